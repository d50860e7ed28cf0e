pub mod consulta_route;
pub mod default_route;
pub mod saude_route;
pub mod sessao_route;
