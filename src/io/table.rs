//! CSV trait table export

use crate::io::error::{GenerationError, Result};
use crate::model::attribute::Attribute;
use crate::model::member::Collection;
use std::path::Path;

/// Header label of the member id column
pub const ID_COLUMN: &str = "ID";

/// Header row: the id column followed by attribute names
pub fn table_header(attributes: &[Attribute]) -> Vec<String> {
    std::iter::once(ID_COLUMN.to_string())
        .chain(attributes.iter().map(|a| a.name.clone()))
        .collect()
}

/// Write one row per member with its id and variant names
///
/// # Errors
///
/// Returns an error if the file cannot be created or a record cannot be written
pub fn write_trait_table(
    path: &Path,
    collection: &Collection,
    attributes: &[Attribute],
) -> Result<()> {
    let table_error = |source: csv::Error| GenerationError::Table {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(table_error)?;
    writer
        .write_record(table_header(attributes))
        .map_err(table_error)?;

    for (id, member) in collection.iter_with_ids() {
        let id_field = id.to_string();
        let record = std::iter::once(id_field.as_str()).chain(member.variant_names(attributes));
        writer.write_record(record).map_err(table_error)?;
    }

    writer
        .flush()
        .map_err(|source| table_error(csv::Error::from(source)))
}
