use tracing_subscriber::EnvFilter;

/// Inicializa o subscriber de logs. Filtro via `RUST_LOG`, padrão `info`.
///
/// Os logs vão para stderr para não misturar com o HTML em stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
