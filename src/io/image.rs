use crate::core::framebuffer::ImageData;
use crate::error::RenderError;
use image::RgbaImage;
use log::info;
use std::path::Path;

/// Wraps an RGBA snapshot as an `image` buffer. Fails if the byte count does not match
/// the dimensions.
pub fn to_rgba_image(image: &ImageData) -> Result<RgbaImage, RenderError> {
    RgbaImage::from_raw(image.width as u32, image.height as u32, image.data.clone()).ok_or_else(
        || {
            RenderError::Validation(format!(
                "Image data has {} bytes, expected {} for {}x{} RGBA",
                image.data.len(),
                image.width * image.height * 4,
                image.width,
                image.height
            ))
        },
    )
}

/// Saves a colour snapshot. The format follows the file extension.
pub fn save_image_data<P: AsRef<Path>>(image: &ImageData, path: P) -> Result<(), RenderError> {
    let path_ref = path.as_ref();
    let img_buf = to_rgba_image(image)?;

    img_buf.save(path_ref).map_err(|e| match e {
        image::ImageError::IoError(io) => RenderError::Io(io),
        other => RenderError::Validation(format!(
            "Failed to save image to {:?}: {}",
            path_ref, other
        )),
    })?;

    info!("Saved {}x{} image to {:?}", image.width, image.height, path_ref);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> ImageData {
        let data = (0..width * height)
            .flat_map(|i| [(i * 10) as u8, 0, 255 - (i * 10) as u8, 255])
            .collect();
        ImageData {
            width,
            height,
            data,
        }
    }

    #[test]
    fn test_to_rgba_image_keeps_layout() {
        let img = to_rgba_image(&gradient(3, 2)).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        // Row-major: pixel index 4 is (1, 1).
        assert_eq!(img.get_pixel(1, 1).0, [40, 0, 215, 255]);
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let mut bad = gradient(2, 2);
        bad.data.pop();
        assert!(matches!(to_rgba_image(&bad), Err(RenderError::Validation(_))));
    }

    #[test]
    fn test_save_png_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let image = gradient(4, 3);

        save_image_data(&image, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.into_raw(), image.data);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");
        assert!(matches!(
            save_image_data(&gradient(1, 1), &path),
            Err(RenderError::Io(_))
        ));
    }
}
