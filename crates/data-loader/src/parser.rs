//! Parsers for the metadata CSV files.
//!
//! - movies.csv: id, title, overview, genres, keywords (plus unused columns)
//! - credits.csv: movie_id (optional), title, cast, crew (plus unused columns)
//!
//! Columns are matched by header name, so extra columns and column order
//! don't matter. Cells are read as-is; the encoded list columns are decoded
//! later by the pipeline.

use crate::error::{DataLoadError, Result};
use crate::types::{CreditRow, MovieRow};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Deserialize every record of a CSV stream.
///
/// `file` is only used to label errors.
pub fn read_records<T, R>(reader: R, file: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: T = result.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.csv file
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRow>> {
    read_records(open(path)?, &file_label(path))
}

/// Parse the credits.csv file
pub fn parse_credits(path: &Path) -> Result<Vec<CreditRow>> {
    read_records(open(path)?, &file_label(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIES: &str = "\
budget,genres,id,keywords,overview,title
237000000,\"[{\"\"id\"\": 28, \"\"name\"\": \"\"Action\"\"}]\",19995,[],In the 22nd century a marine is sent to Pandora.,Avatar
0,[],abc,[],Broken id.,Nameless
1000,[],42,[],,No Overview
";

    const CREDITS: &str = "\
movie_id,title,cast,crew
19995,Avatar,\"[{\"\"name\"\": \"\"Sam Worthington\"\"}]\",[]
";

    #[test]
    fn test_parse_movie_rows() {
        let rows: Vec<MovieRow> = read_records(MOVIES.as_bytes(), "movies.csv").unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].id, Some(19995));
        assert_eq!(rows[0].title.as_deref(), Some("Avatar"));
        assert_eq!(
            rows[0].genres.as_deref(),
            Some(r#"[{"id": 28, "name": "Action"}]"#)
        );
    }

    #[test]
    fn test_invalid_id_and_empty_cell_are_missing() {
        let rows: Vec<MovieRow> = read_records(MOVIES.as_bytes(), "movies.csv").unwrap();

        assert_eq!(rows[1].id, None);
        assert_eq!(rows[2].id, Some(42));
        assert_eq!(rows[2].overview, None);
    }

    #[test]
    fn test_parse_credit_rows() {
        let rows: Vec<CreditRow> = read_records(CREDITS.as_bytes(), "credits.csv").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].movie_id, Some(19995));
        assert_eq!(rows[0].title.as_deref(), Some("Avatar"));
        assert_eq!(rows[0].crew.as_deref(), Some("[]"));
    }

    #[test]
    fn test_credits_without_movie_id_column() {
        let data = "title,cast,crew\nAvatar,[],[]\n";
        let rows: Vec<CreditRow> = read_records(data.as_bytes(), "credits.csv").unwrap();

        assert_eq!(rows[0].movie_id, None);
        assert_eq!(rows[0].title.as_deref(), Some("Avatar"));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let data = "title,cast,crew\nAvatar,[],[],extra\n";
        let err = read_records::<CreditRow, _>(data.as_bytes(), "credits.csv").unwrap_err();

        match err {
            DataLoadError::ParseError { file, line, .. } => {
                assert_eq!(file, "credits.csv");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = parse_movies(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
