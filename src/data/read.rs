use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::{fs::File, io::Read, path::Path};

/// Opens a batch or stream file.
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    File::open(path).map_err(|source| Error::SourceUnavailable {
        path: path.display().to_string(),
        source,
    })
}

/// Creates or truncates a verdict output file.
pub fn open_sink<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    File::create(path).map_err(|source| Error::SourceUnavailable {
        path: path.display().to_string(),
        source,
    })
}

/// Reads `(id1, id2)` pairs from payment rows.
///
/// The first row is a header. Ids are the second and third fields; any
/// fields after them are ignored, so free-text messages may contain commas.
pub fn records<R: Read>(rdr: R) -> Records<R> {
    Records {
        reader: ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(rdr),
        record: StringRecord::new(),
    }
}

pub struct Records<R> {
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<(String, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(parse_pair(&self.record)),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

fn parse_pair(record: &StringRecord) -> Result<(String, String)> {
    match (record.get(1), record.get(2)) {
        (Some(id1), Some(id2)) if !id1.is_empty() && !id2.is_empty() => {
            Ok((id1.to_string(), id2.to_string()))
        }
        _ => Err(Error::MalformedRecord {
            line: record.position().map_or(0, |pos| pos.line()),
            fields: record.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<Result<(String, String)>> {
        records(input.as_bytes()).collect()
    }

    #[test]
    fn test_records() {
        let input = "\
time, id1, id2, amount, message
2016-11-02 09:49:29, 52575, 1120, 25.32, Spam
2016-11-02 09:49:29, 47424, 5995, 19.45, Food, drinks, \"and\" more

2016-11-02 09:49:29, 7555, 8552, 7.87, ";
        let pairs: Vec<_> = collect(input).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(
            pairs,
            vec![
                ("52575".to_string(), "1120".to_string()),
                ("47424".to_string(), "5995".to_string()),
                ("7555".to_string(), "8552".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_record() {
        let input = "time, id1, id2\n1, a, b\n2, c\n3, , d\n";
        let results = collect(input);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(Error::MalformedRecord { line, fields }) => assert_eq!((*line, *fields), (3, 2)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            results[2],
            Err(Error::MalformedRecord { line: 4, fields: 3 })
        ));
    }

    #[test]
    fn test_header_only() {
        assert!(collect("time, id1, id2, amount, message\n").is_empty());
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_open_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        match open_source(dir.path().join("missing.csv")) {
            Err(Error::SourceUnavailable { path, .. }) => assert!(path.ends_with("missing.csv")),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_open_sink_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        match open_sink(dir.path().join("missing").join("output1.txt")) {
            Err(Error::SourceUnavailable { path, .. }) => assert!(path.ends_with("output1.txt")),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
        assert!(open_sink(dir.path().join("output1.txt")).is_ok());
    }
}
