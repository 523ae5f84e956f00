pub mod controller;
pub mod render;

pub use controller::ViewController;
pub use render::{CardView, DetailActivation, DetailView, EmptyState, PageButton, Pagination, Renderer};
