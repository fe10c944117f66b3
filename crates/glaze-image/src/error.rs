/// Errors that can occur when building or accessing image buffers.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// The pixel data length does not match the image dimensions.
    #[error("data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Source and destination dimensions differ.
    #[error("source size ({0}x{1}) does not match destination size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// A pixel coordinate lies outside the image.
    #[error("pixel index ({0}, {1}) out of bounds for image ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// A channel index lies outside the pixel.
    #[error("channel index {0} out of bounds, image has {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// A pixel value could not be represented in the target type.
    #[error("failed to cast pixel value to the target type")]
    CastError,

    /// An indexed pixel referenced a palette entry that does not exist.
    #[error("palette index {0} out of bounds for palette of {1} entries")]
    InvalidPaletteIndex(usize, usize),
}
