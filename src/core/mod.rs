pub mod cancel;
pub mod canvas;
pub mod draw_list;
pub mod surface;

pub use cancel::CancelToken;
pub use canvas::Canvas;
pub use draw_list::{DrawList, DrawOp};
pub use surface::DrawingSurface;
