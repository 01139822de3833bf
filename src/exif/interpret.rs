use chrono::{NaiveDateTime, Timelike};

use super::error::{ExtractError, Stage};
use super::fields::{Field, Rule};
use super::record::FieldValue;

/// Layout of DateTimeOriginal as stored in the container.
const EXIF_TIMESTAMP: &str = "%Y:%m:%d %H:%M:%S";
/// Layout used in captions.
const DISPLAY_TIMESTAMP: &str = "%Y/%m/%d %H:%M";

/// Convert the raw decoded string of `field` into its display form.
///
/// Returns [`ExtractError::UnparseableTimestamp`] (non-fatal) for a bad
/// DateTimeOriginal and [`ExtractError::MalformedContainer`] (fatal) for a
/// non-numeric pixel dimension.
pub fn interpret(field: Field, raw: &str) -> Result<FieldValue, ExtractError> {
    match field.rule() {
        Rule::PassThrough => Ok(FieldValue::Text(raw.to_string())),
        Rule::Aperture => Ok(FieldValue::Text(format_aperture(raw))),
        Rule::Timestamp => format_timestamp(raw)
            .map(FieldValue::Text)
            .ok_or_else(|| ExtractError::UnparseableTimestamp {
                field,
                value: raw.to_string(),
            }),
        Rule::Dimension => raw.parse::<u32>().map(FieldValue::Integer).map_err(|e| {
            ExtractError::malformed(Stage::Interpret, Some(field), format!("{raw:?}: {e}"))
        }),
    }
}

/// FNumber display form, e.g. `18/10` becomes `1.8`.
pub fn format_aperture(raw: &str) -> String {
    format_rational(raw)
}

/// Render a `num/denom` rational with exactly one decimal digit.
///
/// Anything without a `/` is returned unchanged. A rational whose parts are
/// not integers, or whose denominator is zero, is also returned unchanged.
pub fn format_rational(raw: &str) -> String {
    let Some((num, denom)) = raw.split_once('/') else {
        return raw.to_string();
    };
    match (num.trim().parse::<i64>(), denom.trim().parse::<i64>()) {
        (Ok(num), Ok(denom)) if denom != 0 => format!("{:.1}", num as f64 / denom as f64),
        _ => {
            log::debug!("Keeping malformed rational {raw:?} as is");
            raw.to_string()
        }
    }
}

/// Reformat `YYYY:MM:DD HH:MM:SS` to `YYYY/MM/DD HH:MM`.
///
/// `None` when the input does not follow that layout, which includes the
/// blank "unknown date" placeholder.
pub fn format_timestamp(raw: &str) -> Option<String> {
    if !has_timestamp_shape(raw) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, EXIF_TIMESTAMP)
        .ok()
        // chrono reads second 60 as a leap second
        .filter(|t| t.nanosecond() < 1_000_000_000)
        .map(|t| t.format(DISPLAY_TIMESTAMP).to_string())
}

/// Exactly `DDDD:DD:DD DD:DD:DD`: zero-padded digits, one space, no sign.
fn has_timestamp_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 | 13 | 16 => b == b':',
            10 => b == b' ',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(field: Field, raw: &str) -> String {
        match interpret(field, raw).unwrap() {
            FieldValue::Text(s) => s,
            other => panic!("expected text, got {other:?}"),
        }
    }

    // ── aperture ─────────────────────────────────────────────────────

    #[test]
    fn aperture_rationals() {
        assert_eq!(text(Field::FNumber, "16/10"), "1.6");
        assert_eq!(text(Field::FNumber, "28/1"), "28.0");
        assert_eq!(text(Field::FNumber, "18/10"), "1.8");
        assert_eq!(text(Field::FNumber, "56/10"), "5.6");
    }

    #[test]
    fn aperture_without_separator_passes_through() {
        assert_eq!(text(Field::FNumber, "4"), "4");
        assert_eq!(text(Field::FNumber, ""), "");
    }

    #[test]
    fn malformed_aperture_is_kept_raw() {
        assert_eq!(text(Field::FNumber, "a/10"), "a/10");
        assert_eq!(text(Field::FNumber, "16/"), "16/");
        assert_eq!(text(Field::FNumber, "16/0"), "16/0");
        assert_eq!(text(Field::FNumber, "1/2/3"), "1/2/3");
    }

    #[test]
    fn rationals_outside_aperture() {
        assert_eq!(format_rational("50/1"), "50.0");
        assert_eq!(format_rational("247/10"), "24.7");
        assert_eq!(format_rational("35"), "35");
    }

    // ── timestamp ────────────────────────────────────────────────────

    #[test]
    fn timestamp_reformatted_to_minutes() {
        assert_eq!(text(Field::DateTimeOriginal, "2023:04:05 09:30:00"), "2023/04/05 09:30");
        assert_eq!(text(Field::DateTimeOriginal, "2022:12:31 23:59:59"), "2022/12/31 23:59");
    }

    #[test]
    fn blank_timestamp_is_skipped_not_fatal() {
        let err = interpret(Field::DateTimeOriginal, "    :  :     :  :  ").unwrap_err();
        assert!(matches!(err, ExtractError::UnparseableTimestamp { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn wrong_layout_timestamp_is_skipped() {
        for raw in [
            "2023-04-05 09:30:00",
            "2023:04:05",
            "2023:04:05T09:30:00",
            "",
            "2023:4:5 9:30:00",
            " 2023:04:05 09:30:00",
            "2023:04:05  09:30:00",
            "+2023:04:05 09:30:00",
            "2023:04:05 09:30:60",
            "2023:04:05 09:30:00 ",
            "2023:13:05 09:30:00",
        ] {
            let err = interpret(Field::DateTimeOriginal, raw).unwrap_err();
            assert!(!err.is_fatal(), "{raw:?} should not be fatal");
        }
    }

    // ── dimensions ───────────────────────────────────────────────────

    #[test]
    fn dimensions_parse_as_integers() {
        assert_eq!(
            interpret(Field::PixelXDimension, "4032").unwrap(),
            FieldValue::Integer(4032)
        );
        assert_eq!(
            interpret(Field::PixelYDimension, "3024").unwrap(),
            FieldValue::Integer(3024)
        );
    }

    #[test]
    fn non_numeric_dimension_is_fatal() {
        let err = interpret(Field::PixelXDimension, "abc").unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("PixelXDimension"));
    }

    // ── pass-through ─────────────────────────────────────────────────

    #[test]
    fn pass_through_fields_are_untouched() {
        assert_eq!(text(Field::ExposureTime, "1/250"), "1/250");
        assert_eq!(text(Field::FocalLength, "50/1"), "50/1");
        assert_eq!(text(Field::FocalLengthIn35mmFilm, "0"), "0");
        assert_eq!(text(Field::Make, "Canon "), "Canon ");
    }

    #[test]
    fn interpretation_is_idempotent() {
        let inputs = [
            (Field::FNumber, "16/10"),
            (Field::DateTimeOriginal, "2023:04:05 09:30:00"),
            (Field::PixelXDimension, "4032"),
            (Field::Model, "EOS R5"),
        ];
        for (field, raw) in inputs {
            assert_eq!(interpret(field, raw).unwrap(), interpret(field, raw).unwrap());
        }
    }
}
