//! Date parsing for receipts.

use chrono::NaiveDate;

use crate::models::receipt::BillDate;
use crate::receipt::ParseMiss;

/// Parse a `dd/mm/yy` or `dd/mm/yyyy` date.
///
/// The length of the year part picks the format, so `25/12/24` and
/// `25/12/2024` land on the same day. Any other year length is rejected.
pub fn parse_slash_date(raw: &str) -> Option<NaiveDate> {
    let (day_month, year) = raw.trim().rsplit_once('/')?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = match year.len() {
        // POSIX strptime pivot: 69-99 are 19xx, 00-68 are 20xx
        2 => {
            let short: i32 = year.parse().ok()?;
            if short >= 69 { 1900 + short } else { 2000 + short }
        }
        4 => year.parse().ok()?,
        _ => return None,
    };

    NaiveDate::parse_from_str(&format!("{}/{}", day_month, year), "%d/%m/%Y").ok()
}

/// [`FieldRule`](super::FieldRule) normalizer producing ISO bill dates.
pub fn normalize_slash_date(_field: &'static str, raw: &str) -> Result<BillDate, ParseMiss> {
    parse_slash_date(raw)
        .map(BillDate::Iso)
        .ok_or_else(|| ParseMiss::InvalidDate { value: raw.to_string() })
}

/// [`FieldRule`](super::FieldRule) normalizer that keeps the matched text.
pub fn keep_raw_date(_field: &'static str, raw: &str) -> Result<BillDate, ParseMiss> {
    Ok(BillDate::Raw(raw.to_string()))
}

/// Parse any of the date shapes the generic parser recognizes:
/// `dd/mm/yyyy`, `dd-mm-yyyy`, `dd/mm/yy` and `dd MON yyyy`.
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.contains('/') || collapsed.contains('-') {
        return parse_slash_date(&collapsed.replace('-', "/"));
    }

    match collapsed.rsplit_once(' ') {
        Some((_, year)) if year.len() == 4 => NaiveDate::parse_from_str(&collapsed, "%d %b %Y").ok(),
        _ => None,
    }
}
