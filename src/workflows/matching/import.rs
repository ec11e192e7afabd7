//! CSV intake for candidate listings exported from property systems.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::domain::{AmenityId, ListingCandidate, ListingId, NeighborhoodId, PetPolicy};

/// Intake failure for a listing export.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("unable to read listing export {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("listing row {row}: {detail}")]
    InvalidRow { row: usize, detail: String },
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Listing ID")]
    id: String,
    #[serde(rename = "Rent")]
    rent: f64,
    #[serde(rename = "Bedrooms")]
    bedrooms: u8,
    #[serde(rename = "Bathrooms")]
    bathrooms: f64,
    #[serde(rename = "Neighborhood")]
    neighborhood: String,
    #[serde(rename = "Pet Policy", default, deserialize_with = "empty_string_as_none")]
    pet_policy: Option<String>,
    #[serde(rename = "Pet Weight Limit", default)]
    pet_weight_limit: Option<f64>,
    #[serde(
        rename = "Building Amenities",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    building_amenities: Option<String>,
    #[serde(rename = "Unit Amenities", default, deserialize_with = "empty_string_as_none")]
    unit_amenities: Option<String>,
    #[serde(rename = "Available Date", default, deserialize_with = "empty_string_as_none")]
    available_date: Option<String>,
}

pub fn listings_from_path(path: &Path) -> Result<Vec<ListingCandidate>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    listings_from_reader(file)
}

pub fn listings_from_reader<R: Read>(reader: R) -> Result<Vec<ListingCandidate>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut listings = Vec::new();
    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        let row_number = index + 2; // header occupies row 1
        let row = record?;
        listings.push(candidate_from_row(row, row_number)?);
    }
    Ok(listings)
}

fn candidate_from_row(row: ListingRow, row_number: usize) -> Result<ListingCandidate, ImportError> {
    let pet_policy = match row.pet_policy.as_deref() {
        // Exports that omit the policy behave like discretionary buildings.
        None => PetPolicy::CaseByCase,
        Some(label) => PetPolicy::parse_label(label, row.pet_weight_limit).ok_or_else(|| {
            ImportError::InvalidRow {
                row: row_number,
                detail: format!("unrecognized pet policy '{label}'"),
            }
        })?,
    };

    let available_date = row
        .available_date
        .as_deref()
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ImportError::InvalidRow {
                row: row_number,
                detail: format!("unparseable available date '{value}'"),
            })
        })
        .transpose()?;

    Ok(ListingCandidate {
        id: ListingId(row.id),
        rent_price: row.rent,
        bedrooms: row.bedrooms,
        bathrooms: row.bathrooms,
        neighborhood: NeighborhoodId(row.neighborhood),
        pet_policy,
        building_amenities: split_amenities(row.building_amenities.as_deref()),
        unit_amenities: split_amenities(row.unit_amenities.as_deref()),
        available_date,
    })
}

fn split_amenities(cell: Option<&str>) -> BTreeSet<AmenityId> {
    cell.map(|value| {
        value
            .split('|')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| AmenityId(entry.to_string()))
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
