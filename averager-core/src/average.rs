use std::fmt;

use serde::{Serialize, Serializer};

/// Arithmetic mean rounded to two decimal places.
///
/// The mean is computed exactly from the integer sum and count, then rounded
/// half away from zero, so `[1, 2]` gives `1.50` and `[0, 0, 1, 1, 1, 1, 1, 1]`
/// (mean `0.75`) stays `0.75`. An empty input averages to `0.00`.
///
/// Serializes as its two-digit string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Average {
    hundredths: i128,
}

impl Average {
    pub fn of<'a>(values: impl IntoIterator<Item = &'a i64>) -> Self {
        let (sum, count) = values
            .into_iter()
            .fold((0i128, 0i128), |(sum, count), value| {
                (sum + i128::from(*value), count + 1)
            });
        if count == 0 {
            return Self::default();
        }

        let scaled = sum * 100;
        let mut hundredths = scaled / count;
        let remainder = scaled % count;
        if 2 * remainder.abs() >= count {
            hundredths += scaled.signum();
        }
        Self { hundredths }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.hundredths < 0 { "-" } else { "" };
        let abs = self.hundredths.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Average {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
