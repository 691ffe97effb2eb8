use clap::Parser;

/// This is a reporting program for student political-opinion surveys.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file describing the report, in JSON format.
    /// For more information about the file format, read the manual of the survey_stats crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference summary in JSON format. If provided, surveyrpt will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the survey will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, the survey answers are read from this file. Setting this option overrides
    /// what may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv, xlsx or bundled) The type of the input. The default is csv when an input file is given and
    /// the bundled survey otherwise.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. The first worksheet is used by default.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (field name, repeatable) The horizontal axis of an explorer chart. Each --x goes with the --y at the
    /// same position.
    #[clap(short, long, value_parser)]
    pub x: Vec<String>,

    /// (field name, repeatable) The vertical axis of an explorer chart.
    #[clap(short, long, value_parser)]
    pub y: Vec<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
