use super::FileLoadError;
use crate::core::error::EvaluationError;
use crate::core::oscillator::WavefunctionSample;
use std::io::Write;
use std::path::Path;

/// Columns of sampled values sharing one position axis, written as CSV
/// (`x,<name>,<name>,...`).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    positions: Vec<f64>,
    columns: Vec<(String, Vec<f64>)>,
}

impl SampleTable {
    pub fn new(positions: Vec<f64>) -> Self {
        Self {
            positions,
            columns: Vec::new(),
        }
    }

    /// Builds a table of `psi_n` columns; every sample must share one grid.
    pub fn from_wavefunctions(samples: &[WavefunctionSample]) -> Result<Self, EvaluationError> {
        let Some(first) = samples.first() else {
            return Ok(Self::new(Vec::new()));
        };
        let mut table = Self::new(first.positions.clone());
        for sample in samples {
            if sample.positions != first.positions {
                return Err(EvaluationError::GridMismatch(format!(
                    "psi_{} is sampled on a different grid than psi_{}",
                    sample.n, first.n
                )));
            }
            table.push_column(format!("psi_{}", sample.n), sample.amplitudes.clone())?;
        }
        Ok(table)
    }

    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), EvaluationError> {
        let name = name.into();
        if values.len() != self.positions.len() {
            return Err(EvaluationError::GridMismatch(format!(
                "column '{}' has {} values for {} positions",
                name,
                values.len(),
                self.positions.len()
            )));
        }
        self.columns.push((name, values));
        Ok(())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn write_to(&self, writer: impl Write) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["x".to_string()];
        header.extend(self.columns.iter().map(|(name, _)| name.clone()));
        csv_writer.write_record(&header)?;

        for (row, x) in self.positions.iter().enumerate() {
            let mut record = Vec::with_capacity(self.columns.len() + 1);
            record.push(x.to_string());
            record.extend(self.columns.iter().map(|(_, values)| values[row].to_string()));
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_to_path(&self, path: &Path) -> Result<(), FileLoadError> {
        let file = std::fs::File::create(path).map_err(|e| FileLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        self.write_to(file).map_err(|e| FileLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;
    use crate::core::oscillator::sample_wavefunction;
    use tempfile::tempdir;

    #[test]
    fn write_to_emits_header_and_rows() {
        let mut table = SampleTable::new(vec![0.0, 0.5]);
        table.push_column("a", vec![1.0, 2.0]).unwrap();
        table.push_column("b", vec![-1.5, 0.25]).unwrap();

        let mut buffer = Vec::new();
        table.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "x,a,b\n0,1,-1.5\n0.5,2,0.25\n");
    }

    #[test]
    fn push_column_rejects_wrong_length() {
        let mut table = SampleTable::new(vec![0.0, 1.0, 2.0]);
        let result = table.push_column("short", vec![1.0]);
        assert!(matches!(result, Err(EvaluationError::GridMismatch(_))));
    }

    #[test]
    fn from_wavefunctions_names_columns_by_level() {
        let grid = Grid::linspace(-3.0, 3.0, 7).unwrap();
        let samples: Vec<_> = (0..3)
            .map(|n| sample_wavefunction(n, 1.0, &grid).unwrap())
            .collect();
        let table = SampleTable::from_wavefunctions(&samples).unwrap();
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["psi_0", "psi_1", "psi_2"]);
    }

    #[test]
    fn write_to_path_round_trips_through_csv_reader() {
        let grid = Grid::linspace(-1.0, 1.0, 5).unwrap();
        let samples = vec![sample_wavefunction(1, 2.0, &grid).unwrap()];
        let table = SampleTable::from_wavefunctions(&samples).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("psi.csv");
        table.write_to_path(&path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["x", "psi_1"]);
        let rows: Vec<Vec<f64>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2][0], 0.0);
        assert_eq!(rows[2][1], samples[0].amplitudes[2]);
    }
}
