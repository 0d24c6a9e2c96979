//! `/reports`: spreadsheet export

use anyhow::anyhow;
use cartridge_client::ExportRequest;
use shared::util::non_blank;

use crate::app::App;
use crate::cli::ExportCommand;

impl From<ExportCommand> for ExportRequest {
    fn from(cmd: ExportCommand) -> Self {
        match cmd {
            ExportCommand::Cartridges { status, model } => ExportRequest::Cartridges {
                status,
                model: non_blank(model),
            },
            ExportCommand::Operations {
                operation_type,
                from,
                to,
            } => ExportRequest::Operations {
                operation_type,
                start_date: non_blank(from),
                end_date: non_blank(to),
            },
            ExportCommand::Users => ExportRequest::Users,
            ExportCommand::Locations => ExportRequest::Locations,
            ExportCommand::All => ExportRequest::All,
        }
    }
}

pub async fn run(app: &App, cmd: ExportCommand) -> anyhow::Result<()> {
    let request = ExportRequest::from(cmd);
    let path = app
        .api
        .export()
        .download(&request, &app.config.export_dir)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, resource = request.resource(), "export failed");
            anyhow!("Ошибка при экспорте {}", request.label())
        })?;

    println!("Отчёт {} успешно экспортирован", request.label());
    println!("Файл: {}", path.display());
    Ok(())
}
