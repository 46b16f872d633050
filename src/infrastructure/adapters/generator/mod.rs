//! Generator Adapter - 生成服务客户端实现

mod fake_generator_client;
mod http_generator_client;

pub use fake_generator_client::{FakeGeneratorClient, FakeGeneratorConfig};
pub use http_generator_client::{HttpGeneratorClient, HttpGeneratorConfig};
