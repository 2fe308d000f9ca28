use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueHint};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Page documents (YAML or JSON) whose tables are shown together; `-` reads stdin
    #[arg(required = true, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Path to config file
    #[arg(short, long, env = "TABLESORT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0, value_parser = parse_rate)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0, value_parser = parse_rate)]
    pub frame_rate: f64,

    /// Print the tables to stdout instead of starting the interactive view
    #[arg(short, long)]
    pub print: bool,

    /// Activate a header before printing, as if it was clicked; repeatable, applied in order
    #[arg(short, long, value_name = "TABLE:COLUMN", requires = "print")]
    pub sort: Vec<SortArg>,
}

/// Events per second; must be a positive, finite number.
fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(format!("rate must be greater than 0, got `{s}`"));
    }
    Ok(rate)
}

/// A header reference on the command line: `TABLE:COLUMN`, or just `COLUMN` for the first
/// table. Both parts are a 0-based index or a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortArg {
    pub table: Option<String>,
    pub column: String,
}

impl FromStr for SortArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (table, column) = match s.rsplit_once(':') {
            Some((table, column)) => (Some(table.trim()), column.trim()),
            None => (None, s.trim()),
        };
        if column.is_empty() || table.is_some_and(str::is_empty) {
            return Err(format!("expected TABLE:COLUMN, got `{s}`"));
        }
        Ok(Self { table: table.map(str::to_owned), column: column.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_sort_arg() {
        assert_eq!(
            "Standings:Wins".parse::<SortArg>(),
            Ok(SortArg { table: Some("Standings".into()), column: "Wins".into() })
        );
        assert_eq!("2".parse::<SortArg>(), Ok(SortArg { table: None, column: "2".into() }));
        // only the last colon separates
        assert_eq!(
            "a:b:c".parse::<SortArg>(),
            Ok(SortArg { table: Some("a:b".into()), column: "c".into() })
        );
        assert!("Standings:".parse::<SortArg>().is_err());
        assert!(":Wins".parse::<SortArg>().is_err());
        assert!("".parse::<SortArg>().is_err());
    }

    #[test]
    fn test_parse_args() {
        let args =
            Args::try_parse_from(["tablesort", "-p", "-s", "0:1", "-s", "Name", "a.yaml"]).unwrap();
        assert!(args.print);
        assert_eq!(args.files, vec![PathBuf::from("a.yaml")]);
        assert_eq!(args.sort.len(), 2);
        assert_eq!(args.tick_rate, 4.0);

        assert!(Args::try_parse_from(["tablesort"]).is_err());
        assert!(Args::try_parse_from(["tablesort", "-s", "0", "a.yaml"]).is_err());
    }

    #[test]
    fn test_rates_must_be_positive() {
        let args = Args::try_parse_from(["tablesort", "-t", "0.5", "-f", "30", "a.yaml"]).unwrap();
        assert_eq!((args.tick_rate, args.frame_rate), (0.5, 30.0));

        for rate in ["0", "-1", "inf", "NaN", "fast"] {
            assert!(Args::try_parse_from(["tablesort", "-f", rate, "a.yaml"]).is_err(), "{rate}");
            assert!(Args::try_parse_from(["tablesort", "-t", rate, "a.yaml"]).is_err(), "{rate}");
        }
    }
}
