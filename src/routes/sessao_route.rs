use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::services::Navegador;

#[get("/status")]
async fn status(navegador: web::Data<Navegador>) -> HttpResponse {
    let pronto = navegador.pronto().await;
    let mensagem = if pronto {
        "Navegador inicializado e pronto para consultas"
    } else {
        "Navegador ainda não inicializado"
    };

    HttpResponse::Ok().json(json!({
        "pronto": pronto,
        "mensagem": mensagem,
    }))
}

#[post("/inicializar")]
async fn inicializar(navegador: web::Data<Navegador>) -> HttpResponse {
    match navegador.inicializar().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "sucesso": true,
            "mensagem": "Navegador inicializado",
        })),
        Err(e) => {
            log::error!("Initialization request failed. Error: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "sucesso": false,
                "mensagem": e.to_string(),
            }))
        }
    }
}

#[post("/fechar")]
async fn fechar(navegador: web::Data<Navegador>) -> HttpResponse {
    match navegador.fechar().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "sucesso": true,
            "mensagem": "Navegador encerrado",
        })),
        Err(e) => {
            log::error!("Shutdown request failed. Error: {:?}", e);
            HttpResponse::InternalServerError().json(json!({
                "sucesso": false,
                "mensagem": format!("{:#}", e),
            }))
        }
    }
}
