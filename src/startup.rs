use std::net::TcpListener;

use actix_web::{
    dev::Server,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};

use crate::{
    routes::{consulta_route, default_route, saude_route, sessao_route},
    services::Navegador,
};

pub fn run(listener: TcpListener, navegador: Data<Navegador>) -> Result<Server, std::io::Error> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(saude_route::health)
            .service(
                web::scope("/api")
                    .service(sessao_route::status)
                    .service(sessao_route::inicializar)
                    .service(sessao_route::fechar)
                    .service(consulta_route::consultar)
                    .service(consulta_route::consultar_via_query),
            )
            .app_data(navegador.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
