use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::info;

use crate::domain::{Coordinates, Indent, InputError, VehicleId};
use crate::setup::VehicleRequest;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {source}")]
    Input { line: u64, source: InputError },

    #[error("line {line}: expected {expected} columns")]
    MissingColumn { line: u64, expected: usize },
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn field<'r>(record: &'r StringRecord, idx: usize, expected: usize) -> Result<&'r str, FixtureError> {
    record.get(idx).ok_or(FixtureError::MissingColumn {
        line: line_of(record),
        expected,
    })
}

// Only the first row may be a header, and only when it names the key column.
fn is_header(idx: usize, first: &str, key: &str) -> bool {
    idx == 0 && first.eq_ignore_ascii_case(key)
}

fn parse_coordinates(record: &StringRecord, line: u64) -> Result<Coordinates, FixtureError> {
    let coords = match (record.get(1), record.get(2)) {
        (Some(lat), Some(lon)) if !lon.is_empty() => {
            let malformed = || FixtureError::Input {
                line,
                source: InputError::MalformedCoordinates(format!("{lat},{lon}")),
            };
            Coordinates::new(
                lat.parse().map_err(|_| malformed())?,
                lon.parse().map_err(|_| malformed())?,
            )
        }
        (Some(pair), _) => pair
            .parse::<Coordinates>()
            .map_err(|source| FixtureError::Input { line, source })?,
        (None, _) => return Err(FixtureError::MissingColumn { line, expected: 3 }),
    };
    Ok(coords)
}

/// Read `station,indent` rows. A blank indent means the station made no request.
pub fn read_indents<R: io::Read>(reader: R) -> Result<Vec<Indent>, FixtureError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut indents = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let record = row?;
        let station = field(&record, 0, 2)?;
        let raw = record.get(1).unwrap_or("");

        if station.is_empty() || is_header(idx, station, "station") {
            continue;
        }

        let requirement = if raw.is_empty() {
            None
        } else {
            Some(raw.parse::<f64>().map_err(|_| FixtureError::Input {
                line: line_of(&record),
                source: InputError::MalformedNumber {
                    field: "indent",
                    value: raw.to_string(),
                },
            })?)
        };

        indents.push(Indent {
            station: station.to_string(),
            requirement,
        });
    }
    Ok(indents)
}

/// Read `lcv_id,latitude,longitude` rows. A single quoted `"lat,lon"` column
/// is accepted in place of the last two.
pub fn read_vehicle_requests<R: io::Read>(reader: R) -> Result<Vec<VehicleRequest>, FixtureError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut requests = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let record = row?;
        let raw_id = field(&record, 0, 3)?;
        if raw_id.is_empty() || is_header(idx, raw_id, "lcv_id") {
            continue;
        }
        let line = line_of(&record);

        let lcv_id = raw_id
            .parse::<VehicleId>()
            .map_err(|_| FixtureError::Input {
                line,
                source: InputError::MalformedNumber {
                    field: "lcv_id",
                    value: raw_id.to_string(),
                },
            })?;
        let coords = parse_coordinates(&record, line)?;

        requests.push(VehicleRequest { lcv_id, coords });
    }
    Ok(requests)
}

pub fn read_indents_csv(path: &Path) -> Result<Vec<Indent>, FixtureError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    let indents = read_indents(file)?;
    info!("Loaded {} indents from {}", indents.len(), path.display());
    Ok(indents)
}

pub fn read_vehicle_requests_csv(path: &Path) -> Result<Vec<VehicleRequest>, FixtureError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    let requests = read_vehicle_requests(file)?;
    info!("Loaded {} LCV positions from {}", requests.len(), path.display());
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_with_header_and_blanks() {
        let data = "station,indent\nM/s. Auto Prime/Chadarghat,3000\nM/s. Ramesh Fuel Point/Dhoolpet,\n";
        let indents = read_indents(data.as_bytes()).unwrap();
        assert_eq!(
            indents,
            vec![
                Indent {
                    station: "M/s. Auto Prime/Chadarghat".into(),
                    requirement: Some(3000.0)
                },
                Indent {
                    station: "M/s. Ramesh Fuel Point/Dhoolpet".into(),
                    requirement: None
                },
            ]
        );
    }

    #[test]
    fn non_numeric_indent_is_an_input_error() {
        let data = "Other,1200\nM/s. Auto Prime/Chadarghat,lots\n";
        let err = read_indents(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::Input {
                source: InputError::MalformedNumber { field: "indent", .. },
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_indent_on_first_row_is_not_a_header() {
        let data = "M/s. Auto Prime/Chadarghat,lots\n";
        let err = read_indents(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::Input {
                line: 1,
                source: InputError::MalformedNumber { field: "indent", .. },
            }
        ));
    }

    #[test]
    fn vehicle_requests_with_latitude_and_longitude_columns() {
        let data = "lcv_id,latitude,longitude\n1,17.59,78.54\n4,17.48,78.35\n";
        let requests = read_vehicle_requests(data.as_bytes()).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].lcv_id, 1);
        assert_eq!(requests[0].coords, Coordinates::new(17.59, 78.54));
        assert_eq!(requests[1].coords, Coordinates::new(17.48, 78.35));
    }

    #[test]
    fn non_numeric_lcv_id_on_first_row_is_rejected() {
        let data = "first,17.59,78.54\n";
        let err = read_vehicle_requests(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::Input {
                source: InputError::MalformedNumber { field: "lcv_id", .. },
                ..
            }
        ));
    }

    #[test]
    fn vehicle_requests_parse_quoted_coordinates() {
        let data = "lcv_id,coords\n1,\"17.59, 78.54\"\n4,\"17.48,78.35\"\n";
        let requests = read_vehicle_requests(data.as_bytes()).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].lcv_id, 1);
        assert_eq!(requests[1].coords, Coordinates::new(17.48, 78.35));
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        let data = "2,\"north,east\"\n";
        let err = read_vehicle_requests(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::Input {
                source: InputError::MalformedCoordinates(_),
                ..
            }
        ));
    }
}
