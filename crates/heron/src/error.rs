use crate::graphlib::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("layout requires a directed graph")]
    UndirectedGraph,

    #[error("invalid layout options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
