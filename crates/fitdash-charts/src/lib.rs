pub mod axis;
pub mod backends;
pub mod dashboard;
pub mod error;
pub mod renderers;
pub mod scale;
pub mod shape;

pub use backends::{create_backend, BackendKind, DrawingBackend, JsonBackend, MemoryBackend, SvgBackend};
pub use dashboard::{Dashboard, DashboardView};
pub use error::RenderError;
pub use renderers::{create_renderers, BarRenderer, ChartRenderer, LineRenderer, PieRenderer, ScatterRenderer};
pub use scale::{
    ArcSlice, BandScale, Channel, Domain, LinearScale, MappingLaw, OrdinalScale, PieLayout,
    PointScale, ScaleSpec,
};
pub use shape::{ChartFrame, ChartKind, Coord, PathCommand, Shape, TextAnchor};
