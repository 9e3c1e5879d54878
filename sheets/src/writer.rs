//! Single-cell write orchestration.
//!
//! The full flow of the `sheet write` command: resolve the spreadsheet
//! by name, confirm the worksheet exists, write the one configured
//! cell. Each lookup failure maps to [`SheetError::ResourceNotFound`]
//! naming the missing resource, so the operator learns which name was
//! wrong instead of getting a bare API error.

use tracing::info;

use crate::cell::CellRef;
use crate::client::SheetsApi;
use crate::error::{ResourceKind, SheetError};

/// Everything the writer needs, supplied externally (flags or
/// environment), never hardcoded.
#[derive(Debug, Clone)]
pub struct WriteTask {
    pub spreadsheet_name: String,
    pub worksheet_name: String,
    pub cell: CellRef,
    pub value: String,
}

impl WriteTask {
    /// The `Worksheet!Cell` reference this task targets.
    pub fn target(&self) -> String {
        format!("{}!{}", self.worksheet_name, self.cell)
    }
}

/// Writes `task.value` into the configured cell.
///
/// Performs exactly one write call and touches no other cell. Returns
/// the `Worksheet!Cell` reference actually written, which is what any
/// confirmation message must quote.
pub async fn write_value(api: &dyn SheetsApi, task: &WriteTask) -> Result<String, SheetError> {
    let spreadsheet_id = api
        .spreadsheet_id_by_name(&task.spreadsheet_name)
        .await?
        .ok_or_else(|| SheetError::ResourceNotFound {
            kind: ResourceKind::Spreadsheet,
            name: task.spreadsheet_name.clone(),
        })?;

    if !api
        .worksheet_exists(&spreadsheet_id, &task.worksheet_name)
        .await?
    {
        return Err(SheetError::ResourceNotFound {
            kind: ResourceKind::Worksheet,
            name: task.worksheet_name.clone(),
        });
    }

    api.write_cell(&spreadsheet_id, &task.worksheet_name, &task.cell, &task.value)
        .await?;

    let target = task.target();
    info!(target_cell = %target, "value written");
    Ok(target)
}
