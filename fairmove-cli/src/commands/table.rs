use comfy_table::{presets::UTF8_FULL, Table};
use fairmove_core::{GameConfig, OutcomeTable};

pub async fn handle_table_command(config: GameConfig) -> anyhow::Result<()> {
    let table = OutcomeTable::build(&config.moves);

    println!("Outcome of the row move (you) against the column move (computer):");
    println!("{}", render_table(&table));

    Ok(())
}

pub fn render_table(outcomes: &OutcomeTable) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Move".to_string()];
    header.extend(outcomes.moves().iter().cloned());
    table.set_header(header);

    for (name, row) in outcomes.rows() {
        let mut cells = vec![name.to_string()];
        cells.extend(row.iter().map(|outcome| outcome.to_string()));
        table.add_row(cells);
    }

    table
}
