use std::time::Duration;

use thirtyfour::prelude::*;

use crate::{
    domain::{Consulta, ConsultaError, ConsultaResultado},
    services::Navegador,
};

const CONSULTA_URL: &str =
    "https://processual.trf1.jus.br/consultaProcessual/processoExecucao/listar.php";

/// Keyword phrases in priority order; the first one present in the rendered
/// page decides the match.
const PALAVRAS_CHAVE: [&str; 6] = [
    "Requisição de Pequeno Valor",
    "RPV",
    "migração",
    "migrado",
    "precatório",
    "requisitorio",
];

const MARCADOR_CONTEUDO: &str = "table";
const ESPERA_CONTEUDO: Duration = Duration::from_secs(30);
const INTERVALO_SONDAGEM: Duration = Duration::from_millis(500);

/// One navigate-extract-match cycle. Bootstraps the browser session on first
/// use, then holds it for the whole consulta so parallel requests cannot
/// corrupt each other's navigation. Every failure comes back as a
/// `sucesso=false` resultado; nothing propagates past this boundary.
pub async fn consultar_processo(navegador: &Navegador, consulta: &Consulta) -> ConsultaResultado {
    if let Err(e) = navegador.inicializar().await {
        log::error!("Browser bootstrap failed. Error: {}", e);
        return ConsultaResultado::falha(&e);
    }

    let sessao = navegador.sessao().await;
    let Some(driver) = sessao.as_ref() else {
        // The session was closed between bootstrap and lock acquisition.
        let erro =
            ConsultaError::Navegacao("sessão do navegador não está mais disponível".to_string());
        return ConsultaResultado::falha(&erro);
    };

    let url = montar_url(consulta);
    log::info!(
        "Consulting process {} at section {}/{}",
        consulta.processo,
        consulta.secao,
        consulta.uf
    );

    match extrair_html(driver, &url).await {
        Ok(html) => match detectar_rpv(&html) {
            Some(palavra) => {
                log::info!(
                    "Keyword \"{}\" found for process {}",
                    palavra,
                    consulta.processo
                );
                ConsultaResultado::encontrado(palavra)
            }
            None => ConsultaResultado::sem_rpv(),
        },
        Err(erro) => {
            log::error!(
                "Consulta failed for process {}. Error: {}",
                consulta.processo,
                erro
            );
            ConsultaResultado::falha(&erro)
        }
    }
}

fn montar_url(consulta: &Consulta) -> String {
    // The lookup endpoint takes the parameters verbatim, unescaped.
    format!(
        "{}?secao={}&proc={}&uf={}",
        CONSULTA_URL, consulta.secao, consulta.processo, consulta.uf
    )
}

async fn extrair_html(driver: &WebDriver, url: &str) -> Result<String, ConsultaError> {
    driver
        .goto(url)
        .await
        .map_err(|e| ConsultaError::Navegacao(e.to_string()))?;

    // Best effort: some deployments render the result table late, others not
    // at all (e.g. behind a bot challenge, left unhandled on purpose). The
    // scan runs over whatever HTML the page served.
    let marcador = driver
        .query(By::Css(MARCADOR_CONTEUDO))
        .wait(ESPERA_CONTEUDO, INTERVALO_SONDAGEM)
        .first()
        .await;
    if marcador.is_err() {
        log::warn!(
            "Content marker <{}> did not appear, scanning the page as-is",
            MARCADOR_CONTEUDO
        );
    }

    driver
        .source()
        .await
        .map_err(|e| ConsultaError::Extracao(e.to_string()))
}

/// Case-insensitive scan for the first keyword present in the page text.
pub fn detectar_rpv(html: &str) -> Option<&'static str> {
    let html = html.to_lowercase();
    PALAVRAS_CHAVE
        .iter()
        .find(|palavra| html.contains(&palavra.to_lowercase()))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_precatorio_when_higher_priority_keywords_are_absent() {
        let html = "<html><body>Existe precatório expedido nos autos.</body></html>";
        assert_eq!(detectar_rpv(html), Some("precatório"));
    }

    #[test]
    fn full_phrase_outranks_its_own_sigla() {
        let html = "<td>Requisição de Pequeno Valor (RPV) expedida</td>";
        assert_eq!(detectar_rpv(html), Some("Requisição de Pequeno Valor"));
    }

    #[test]
    fn sigla_outranks_later_keywords() {
        let html = "<td>RPV expedida, aguardando precatório</td>";
        assert_eq!(detectar_rpv(html), Some("RPV"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            detectar_rpv("processo em MIGRAÇÃO para o novo sistema"),
            Some("migração")
        );
        assert_eq!(
            detectar_rpv("requisição de pequeno valor paga"),
            Some("Requisição de Pequeno Valor")
        );
    }

    #[test]
    fn page_without_keywords_yields_no_match() {
        let html = "<html><body>Nenhum registro encontrado.</body></html>";
        assert_eq!(detectar_rpv(html), None);
    }

    #[test]
    fn url_interpolates_the_three_parameters_verbatim() {
        let consulta = Consulta {
            secao: "TRF1".to_string(),
            processo: "10025962720234013311".to_string(),
            uf: "BA".to_string(),
        };

        assert_eq!(
            montar_url(&consulta),
            "https://processual.trf1.jus.br/consultaProcessual/processoExecucao/listar.php?secao=TRF1&proc=10025962720234013311&uf=BA"
        );
    }
}
