//! User-facing messages (pt-BR).
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

pub const STATUS_CONNECTING: &str = "Conectando...";
pub const STATUS_ONLINE: &str = "Online";
pub const STATUS_OFFLINE: &str = "Offline";

pub const STATS_UNAVAILABLE: &str =
    "Não foi possível conectar ao servidor. Verifique se a API está rodando.";
pub const REGIONS_UNAVAILABLE: &str = "Não foi possível carregar os totais por UF.";
pub const SEARCH_FAILED: &str = "Falha ao buscar dados. Tente novamente.";
pub const EXPENSES_UNAVAILABLE: &str = "Não foi possível carregar os detalhes desta operadora.";
pub const DETAIL_UNAVAILABLE: &str = "Não foi possível encontrar os detalhes desta operadora.";
