use std::fmt;

use super::View;
use crate::toolkit::array::AFloat;

const ELLIPSIS: &str = "...";
const SEPARATOR: &str = "  ";

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'a str>,
    width: usize,
) -> fmt::Result {
    let line: Vec<String> = cells.map(|cell| format!("{cell:>width$}")).collect();
    writeln!(f, "{}", line.join(SEPARATOR))
}

/// A preview of the first `preview_rows` rows, every column right-aligned to
/// one shared width.
impl<T: AFloat> fmt::Display for View<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.options.precision;
        let num_rows = self.len().min(self.options.preview_rows);
        let truncated = self.len() > num_rows;
        let cells: Vec<Vec<String>> = self.with_values(|values| {
            values
                .rows()
                .into_iter()
                .take(num_rows)
                .map(|row| row.iter().map(|x| format!("{x:.precision$}")).collect())
                .collect()
        });
        let names = self.column_names();
        let width = names
            .iter()
            .chain(cells.iter().flatten())
            .map(String::len)
            .chain(truncated.then_some(ELLIPSIS.len()))
            .max()
            .unwrap_or(0);

        write_line(f, names.iter().map(String::as_str), width)?;
        for row in cells.iter() {
            write_line(f, row.iter().map(String::as_str), width)?;
        }
        if truncated {
            write_line(f, names.iter().map(|_| ELLIPSIS), width)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use crate::df::{frame::tests::get_test_df, DataFrame, FrameOptions};

    #[test]
    fn test_display() {
        let df = get_test_df();
        let rendered = df.slice(Some(2), None).to_string();
        let expected = [
            "        a          b          c",
            " 7.000000   8.000000   9.000000",
            "10.000000  11.000000  12.000000",
            "",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_display_truncates() {
        let values = Array2::from_shape_fn((7, 1), |(i, _)| i as f64);
        let df = DataFrame::with_options(
            values,
            ["x"],
            FrameOptions::default().with_preview_rows(2).with_precision(1),
        )
        .unwrap();
        assert_eq!(df.to_string(), "  x\n0.0\n1.0\n...\n");
    }
}
