use anyhow::Context;
use colored::*;
use opskit_sheets::{SheetsClient, WriteTask, write_value};
use tracing::info;

use crate::commands::SheetCommands;

pub async fn run(command: SheetCommands) -> anyhow::Result<()> {
    match command {
        SheetCommands::Write {
            value,
            credentials,
            spreadsheet,
            worksheet,
            cell,
        } => {
            let task = WriteTask {
                spreadsheet_name: spreadsheet,
                worksheet_name: worksheet,
                cell,
                value,
            };

            info!("authenticating against the sheets API");
            let client = SheetsClient::connect(&credentials)
                .await
                .context("authentication failed")?;

            let written = write_value(&client, &task)
                .await
                .with_context(|| format!("could not write to {}", task.target()))?;

            println!(
                "Done - wrote '{}' to {} in '{}'",
                task.value.bold(),
                written.green().bold(),
                task.spreadsheet_name
            );
            Ok(())
        }
    }
}
