/// Built-in caption provider backed by YouTube's InnerTube API.
#[cfg(feature = "youtube")]
pub mod youtube;
