use std::net::TcpListener;

use actix_web::web;
use env_logger::Env;
use vigia::{configuration::get_configuration, services::Navegador, startup::run};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    log::info!("Listening on {}", address);

    let navegador = web::Data::new(Navegador::new(configuration.navegador));

    let server = run(listener, navegador.clone())?;
    server.await?;

    // Actix resolves the server future after graceful shutdown (SIGINT or
    // SIGTERM); take the browser down with it.
    if let Err(e) = navegador.fechar().await {
        log::error!(
            "Failed to close the browser session on shutdown. Error: {:?}",
            e
        );
    }

    Ok(())
}
