use rusqlite::Connection;

pub fn create_tables(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        -- Almacenamiento local clave/valor (equivalente a localStorage)
        CREATE TABLE IF NOT EXISTS almacenamiento (
            clave TEXT PRIMARY KEY,
            valor TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
        );
        ",
    )?;

    Ok(())
}
