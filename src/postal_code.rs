//! Postal code rows and their mapping from the Japan Post CSV layout.

use csv::StringRecord;

// Column positions in utf_ken_all.csv
const ZIPCODE: usize = 2;
const PREF_KANA: usize = 3;
const CITY_KANA: usize = 4;
const TOWN_KANA: usize = 5;
const PREF: usize = 6;
const CITY: usize = 7;
const TOWN: usize = 8;

/// One destination row of `postal_codes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCode {
    /// 7-digit postal code, as written in the source
    pub zipcode: String,

    /// Prefecture
    pub pref: String,

    /// City, ward, town or village
    pub city: String,

    /// Town area
    pub town: String,

    pub pref_kana: Option<String>,
    pub city_kana: Option<String>,
    pub town_kana: Option<String>,
}

impl PostalCode {
    /// Projects a raw CSV record onto the destination field order.
    ///
    /// Fields are copied verbatim. Columns past the end of a short record
    /// become empty strings for required fields and `None` for kana.
    pub fn from_record(record: &StringRecord) -> Self {
        let required = |idx| record.get(idx).unwrap_or_default().to_string();
        let optional = |idx| record.get(idx).map(str::to_string);

        PostalCode {
            zipcode: required(ZIPCODE),
            pref: required(PREF),
            city: required(CITY),
            town: required(TOWN),
            pref_kana: optional(PREF_KANA),
            city_kana: optional(CITY_KANA),
            town_kana: optional(TOWN_KANA),
        }
    }
}
