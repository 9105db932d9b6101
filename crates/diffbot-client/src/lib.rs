pub mod instrument;
pub mod transport;

pub use instrument::TracingInstrumentor;
pub use transport::ReqwestTransport;

use diffbot_core::{AppError, Config, Diffbot};

/// A [`Diffbot`] client that talks to the real API.
pub type DiffbotClient = Diffbot<ReqwestTransport>;

/// Build a [`DiffbotClient`] with a default [`ReqwestTransport`].
pub fn connect(config: Config) -> Result<DiffbotClient, AppError> {
    Ok(Diffbot::new(config, ReqwestTransport::new()?))
}
