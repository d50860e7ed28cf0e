use serde::{Deserialize, Serialize};

/// Raw consulta parameters as they arrive on the wire, either as a JSON body
/// or as query-string parameters. Presence and non-emptiness are checked by
/// `validar` before any browser interaction happens.
#[derive(Debug, Deserialize)]
pub struct ConsultaParams {
    pub secao: Option<String>,
    #[serde(rename = "proc")]
    pub processo: Option<String>,
    pub uf: Option<String>,
}

/// A validated process lookup: judicial section, process number and state code.
#[derive(Debug, Clone, PartialEq)]
pub struct Consulta {
    pub secao: String,
    pub processo: String,
    pub uf: String,
}

impl ConsultaParams {
    pub fn validar(self) -> Result<Consulta, String> {
        let secao = non_blank(self.secao, "secao")?;
        let processo = non_blank(self.processo, "proc")?;
        let uf = non_blank(self.uf, "uf")?;

        Ok(Consulta {
            secao,
            processo,
            uf,
        })
    }
}

fn non_blank(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("Campo obrigatório ausente ou vazio: {}", field)),
    }
}

/// Outcome of one navigate-extract-match cycle. `tem_rpv` and `detalhes` are
/// only present when the page was actually fetched; a failed fetch carries the
/// underlying error text in `mensagem`.
#[derive(Debug, Serialize, PartialEq)]
pub struct ConsultaResultado {
    pub sucesso: bool,
    pub mensagem: String,
    #[serde(rename = "temRPV", skip_serializing_if = "Option::is_none")]
    pub tem_rpv: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalhes: Option<String>,
}

impl ConsultaResultado {
    pub fn encontrado(palavra_chave: &str) -> Self {
        ConsultaResultado {
            sucesso: true,
            mensagem: format!(
                "Possível RPV detectada: a página contém \"{}\"",
                palavra_chave
            ),
            tem_rpv: Some(true),
            detalhes: Some(palavra_chave.to_string()),
        }
    }

    pub fn sem_rpv() -> Self {
        ConsultaResultado {
            sucesso: true,
            mensagem: "Nenhuma menção a RPV encontrada na página".to_string(),
            tem_rpv: Some(false),
            detalhes: Some(String::new()),
        }
    }

    pub fn falha(erro: &ConsultaError) -> Self {
        ConsultaResultado {
            sucesso: false,
            mensagem: erro.to_string(),
            tem_rpv: None,
            detalhes: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConsultaError {
    #[error("Falha na inicialização do navegador: {0}")]
    Inicializacao(String),
    #[error("Falha de navegação: {0}")]
    Navegacao(String),
    #[error("Falha na extração do conteúdo da página: {0}")]
    Extracao(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(secao: Option<&str>, processo: Option<&str>, uf: Option<&str>) -> ConsultaParams {
        ConsultaParams {
            secao: secao.map(str::to_string),
            processo: processo.map(str::to_string),
            uf: uf.map(str::to_string),
        }
    }

    #[test]
    fn complete_params_validate() {
        let consulta = params(Some("TRF1"), Some("10025962720234013311"), Some("BA"))
            .validar()
            .unwrap();

        assert_eq!(consulta.secao, "TRF1");
        assert_eq!(consulta.processo, "10025962720234013311");
        assert_eq!(consulta.uf, "BA");
    }

    #[test]
    fn missing_or_blank_fields_are_rejected() {
        let err = params(None, Some("123"), Some("BA")).validar().unwrap_err();
        assert!(err.contains("secao"));

        let err = params(Some("TRF1"), Some("   "), Some("BA"))
            .validar()
            .unwrap_err();
        assert!(err.contains("proc"));

        let err = params(Some("TRF1"), Some("123"), Some(""))
            .validar()
            .unwrap_err();
        assert!(err.contains("uf"));
    }

    #[test]
    fn found_result_serializes_with_portuguese_field_names() {
        let resultado = ConsultaResultado::encontrado("Requisição de Pequeno Valor");
        let json = serde_json::to_value(&resultado).unwrap();

        assert_eq!(json["sucesso"], true);
        assert_eq!(json["temRPV"], true);
        assert_eq!(json["detalhes"], "Requisição de Pequeno Valor");
    }

    #[test]
    fn failure_result_omits_match_fields() {
        let erro = ConsultaError::Navegacao("timeout".to_string());
        let resultado = ConsultaResultado::falha(&erro);
        let json = serde_json::to_value(&resultado).unwrap();

        assert_eq!(json["sucesso"], false);
        assert!(json["mensagem"].as_str().unwrap().contains("timeout"));
        assert!(json.get("temRPV").is_none());
        assert!(json.get("detalhes").is_none());
    }

    #[test]
    fn no_match_result_has_empty_detalhes() {
        let json = serde_json::to_value(ConsultaResultado::sem_rpv()).unwrap();

        assert_eq!(json["sucesso"], true);
        assert_eq!(json["temRPV"], false);
        assert_eq!(json["detalhes"], "");
    }
}
