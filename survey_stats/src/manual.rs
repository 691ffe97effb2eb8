/*!

This is the long-form manual for `survey_stats` and `surveyrpt`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, as exported by the survey form
* `xlsx` the same table in an Excel workbook
* `bundled` the export shipped with the crate (the default)

### `csv`

One line per respondent, the first line being the header. The names in the header
are not significant: the answers are read by position, in this order:

| column | field                |
|--------|----------------------|
| 0      | `GPA`                |
| 1      | `Home`               |
| 2      | `Senators`           |
| 3      | `NewsSource`         |
| 4      | `PoliticalParty`     |
| 5      | `ParentsParty`       |
| 6      | `Ideology`           |
| 7      | `TrustGovernment`    |
| 8      | `TrumpApproval`      |
| 9      | `Environment`        |
| 10     | `ElectionConfidence` |
| 11     | `MinimumWage`        |
| 12     | `GradeLevel`         |
| 13     | `PoliticalKnowledge` |

```text
GPA,Home,Senators,...,PoliticalKnowledge
3.01-3.5,Urban,"Josh Shapiro and Madeline Dean",...,FALSE
```

A field may be wrapped in double quotes to contain commas. Quotes cannot be escaped
inside a field. Every field is trimmed. Missing trailing fields are read as empty
answers, and blank lines are skipped. `PoliticalKnowledge` is true when it reads
`TRUE` in any case.

`NewsSource`, `PoliticalParty` and `ParentsParty` are multi-select questions: the
selected answers are separated by `;` (a trailing `;` is common).

### `xlsx`

The same columns, in the first worksheet of the workbook (or the worksheet named by
`excelWorksheetName`). The first row is the header. Numbers are read without their
decimals when they are whole (`12.0` is read as `12`).

## Normalization

Before they are counted, some answers are folded into a few categories:
- news sources: `TikTok/Instagram`, then `Cable TV News`, `Friends & Family`,
  `Online News`, `Twitter`, checked in this order over all the selected sources.
  Empty answers are `Unknown`, anything else is `Other`.
- parties: empty answers and `Don't Know/Don't Identify` are `No Affiliation`,
  then `Republican`, `Democrat`, `Independent` in this order, anything else is `Other`.
- ideologies: `Liberal`, `Somewhat Liberal`, `Moderate`, `Somewhat Conservative`,
  `Conservative`. Empty answers are `Unknown`.

`Unknown` and empty categories are never counted.

## The explorer

The explorer draws one chart for a pair of fields (`--x`, `--y`, or the `explorer`
section of the configuration):
- two numeric fields (`GPA`, `GradeLevel`) give a scatter plot with a least-squares
  regression line, the correlation and the descriptive statistics of both axes.
  GPA brackets are placed at 2.75, 3.25, 3.75 and 4.2. Respondents with a missing or
  zero value are left out.
- `PoliticalKnowledge` on either axis gives the rate of correct answers per category
  of the other field, the highest rate first.
- two other fields give a cross-tabulation.

A numeric field against a categorical field gives an empty table.

When all the x values are equal, the regression is not defined and the scatter plot
has no line.

## Configuration

`surveyrpt` works without configuration: it reports on the bundled survey, with the
party against the knowledge question in the explorer. A configuration file in JSON
may be passed with `--config`:

```text
{
  "outputSettings": {
    "reportName": "November survey",
    "outputPath": "summary.json",
    "surveyDate": "2025-11",
    "includeNarratives": true
  },
  "dataSource": {
    "provider": "csv",
    "filePath": "survey-data.csv"
  },
  "explorer": [
    { "x": "PoliticalParty", "y": "PoliticalKnowledge" },
    { "x": "GPA", "y": "GradeLevel" }
  ]
}
```

OutputSettings:
 - `reportName` (string): the name of the report.
 - `outputPath` (string, optional): where to write the summary. `stdout` prints it.
 - `surveyDate` (string, optional): copied to the summary.
 - `includeNarratives` (boolean, optional, default true): includes the narrative of
   each insight.

DataSource:
 - `provider` (string): `csv`, `xlsx` or `bundled`.
 - `filePath` (string, optional): relative paths are resolved against the directory
   of the configuration file.
 - `excelWorksheetName` (string, optional): for Excel inputs, the name of the worksheet.

The command line options take precedence over the configuration file.

## Reference summaries

With `--reference`, the summary is compared with a previously saved summary. Any
difference is printed and makes the program fail, which is how the tests in the
`tests` directory are written.

 */
