use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::open(path)?,
            None => Output::Stdout {
                writer: io::stdout().lock(),
            },
        };
        output.write_json(value)
    }

    fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Reads observed values from a file.
///
/// The file holds either a JSON array of numbers or numbers separated by whitespace.
pub fn read_values_file<P>(path: P) -> anyhow::Result<Vec<f64>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open values file: {}", path.display()))?;
    parse_values(&text).with_context(|| format!("Failed to parse values file: {}", path.display()))
}

fn parse_values(text: &str) -> anyhow::Result<Vec<f64>> {
    let values = if text.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<f64>>(text)?
    } else {
        text.split_whitespace()
            .enumerate()
            .map(|(i, token)| {
                token
                    .parse::<f64>()
                    .with_context(|| format!("invalid number #{}: {token:?}", i + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };
    if values.is_empty() {
        bail!("no values found");
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let values = parse_values("[0, 1.5, -2e3]\n").unwrap();
        assert_eq!(values, vec![0.0, 1.5, -2000.0]);
    }

    #[test]
    fn test_parse_whitespace_separated() {
        let values = parse_values("1 2\n3\t4.25\n\n").unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.25]);
    }

    #[test]
    fn test_parse_reports_bad_token() {
        let err = parse_values("1 two 3").unwrap_err();
        assert!(err.to_string().contains("invalid number #2"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_values("").is_err());
        assert!(parse_values("  \n").is_err());
        assert!(parse_values("[]").is_err());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_values("[1, 2,").is_err());
    }
}
