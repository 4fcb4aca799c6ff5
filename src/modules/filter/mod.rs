mod contoursize;
mod countarea;

pub use contoursize::ContourSize;
pub use countarea::CountArea;
