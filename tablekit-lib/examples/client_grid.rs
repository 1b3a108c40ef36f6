//! Client-memory grid walkthrough: configure a table, feed it a submitted
//! payload, render it, and resolve cascading dropdown options.
//!
//! Run with: cargo run --example client_grid

use serde_json::json;
use tablekit_lib::Table;
use tablekit_lib::column::ColumnSpec;
use tablekit_lib::column::ColumnType;
use tablekit_lib::config::TableConfig;
use tablekit_lib::options::DropdownOption;
use tablekit_lib::request::TableRequest;
use tablekit_lib::source::DataSourceRegistry;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config = TableConfig::new("client")
        .with_column(
            ColumnSpec::new("name", ColumnType::String)
                .with_title("lang.columns.name")
                .required(),
        )
        .with_column(ColumnSpec::new("country", ColumnType::Dropdown).with_options(vec![
            "Australia".to_string(),
            "New Zealand".to_string(),
        ]))
        .with_column(ColumnSpec::new("city", ColumnType::Dropdown));

    // The client resubmits its copy of the grid on every postback.
    let request = TableRequest::post().with_param(
        "tableTableData",
        json!([
            {"id": 1, "name": "Alice", "country": "Australia", "city": "Sydney"},
            {"id": 2, "name": "Bob", "country": "New Zealand", "city": null}
        ]),
    );

    let registry = DataSourceRegistry::new();
    let mut table = Table::new("table", config, &registry, &request)?;

    // Cascading select: city choices depend on the row's country.
    table.register_option_resolver(|column, row| {
        if column != "city" {
            return Vec::new();
        }
        match row.get_string("country").ok().flatten() {
            Some("Australia") => vec![
                DropdownOption::new("syd", "Sydney"),
                DropdownOption::new("mel", "Melbourne"),
            ],
            Some("New Zealand") => vec![DropdownOption::new("wlg", "Wellington")],
            _ => Vec::new(),
        }
    });

    let vars = table.render_vars()?;
    println!("render vars: {}", serde_json::to_string_pretty(&vars)?);

    let options = table.dropdown_options(
        &TableRequest::post()
            .with_param("column", json!("city"))
            .with_param("rowData", json!({"id": 2, "country": "New Zealand"})),
    )?;
    println!("city options: {}", serde_json::to_string(&options)?);

    for error in table.validate_records()? {
        println!("validation: {error}");
    }

    Ok(())
}
