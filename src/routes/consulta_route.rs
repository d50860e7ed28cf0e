use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::{
    domain::ConsultaParams,
    services::{consultar_processo, Navegador},
};

#[post("/consultar")]
async fn consultar(
    navegador: web::Data<Navegador>,
    body: web::Json<ConsultaParams>,
) -> HttpResponse {
    executar_consulta(navegador, body.into_inner()).await
}

#[get("/consultar")]
async fn consultar_via_query(
    navegador: web::Data<Navegador>,
    params: web::Query<ConsultaParams>,
) -> HttpResponse {
    executar_consulta(navegador, params.into_inner()).await
}

/// Validation happens before any browser interaction; a missing or blank
/// field short-circuits with 400 and never touches the session.
async fn executar_consulta(navegador: web::Data<Navegador>, params: ConsultaParams) -> HttpResponse {
    let consulta = match params.validar() {
        Ok(consulta) => consulta,
        Err(mensagem) => {
            return HttpResponse::BadRequest().json(json!({
                "sucesso": false,
                "mensagem": mensagem,
            }))
        }
    };

    let resultado = consultar_processo(&navegador, &consulta).await;
    HttpResponse::Ok().json(resultado)
}
