use std::path::Path;

use ::image::{Rgb, RgbImage};
use anyhow::Context;
use stencil::{Channels, Matrix};

/// Decodes `path` into red, green and blue planes.
pub fn read_image(path: impl AsRef<Path>) -> anyhow::Result<Channels> {
    let path = path.as_ref();
    let image = ::image::open(path).with_context(|| format!("Can not open {}", path.display()))?.to_rgb8();
    channels_from_rgb(&image)
}

/// Encodes `channels` to `path`, saturating every value into `0..=255`.
pub fn write_image(path: impl AsRef<Path>, channels: &Channels) -> anyhow::Result<()> {
    let path = path.as_ref();
    rgb_from_channels(channels)?.save(path).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn channels_from_rgb(image: &RgbImage) -> anyhow::Result<Channels> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let mut planes: [Vec<i32>; 3] = std::array::from_fn(|_| Vec::with_capacity(width * height));

    for pixel in image.pixels() {
        for (plane, &val) in planes.iter_mut().zip(pixel.0.iter()) {
            plane.push(i32::from(val));
        }
    }

    let [r, g, b] = planes;

    Ok(Channels::new(
        Matrix::from_vec(width, height, r)?,
        Matrix::from_vec(width, height, g)?,
        Matrix::from_vec(width, height, b)?,
    )?)
}

pub fn rgb_from_channels(channels: &Channels) -> anyhow::Result<RgbImage> {
    let width = u32::try_from(channels.width()).context("Image too wide to encode")?;
    let height = u32::try_from(channels.height()).context("Image too tall to encode")?;

    let saturate = |x: i32| x.clamp(0, 255) as u8;

    let pixels = channels
        .red()
        .as_slice()
        .iter()
        .zip(channels.green().as_slice())
        .zip(channels.blue().as_slice())
        .map(|((&r, &g), &b)| Rgb([saturate(r), saturate(g), saturate(b)]));

    let mut image = RgbImage::new(width, height);
    for (dst, src) in image.pixels_mut().zip(pixels) {
        *dst = src;
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planes_are_red_green_blue() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([10, 20, 30]));
        image.put_pixel(1, 0, Rgb([40, 50, 60]));

        let channels = channels_from_rgb(&image).unwrap();
        assert_eq!((channels.width(), channels.height()), (2, 1));
        assert_eq!(channels.red().as_slice(), &[10, 40]);
        assert_eq!(channels.green().as_slice(), &[20, 50]);
        assert_eq!(channels.blue().as_slice(), &[30, 60]);
    }

    #[test]
    fn export_saturates() {
        let r = Matrix::from_slice(3, 1, &[-5, 128, 300]).unwrap();
        let g = Matrix::from_slice(3, 1, &[0, 255, 256]).unwrap();
        let b = Matrix::from_slice(3, 1, &[i32::MIN, 1, i32::MAX]).unwrap();

        let image = rgb_from_channels(&Channels::new(r, g, b).unwrap()).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([128, 255, 1]));
        assert_eq!(image.get_pixel(2, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn pixels_survive_conversion() {
        let image = RgbImage::from_fn(5, 3, |x, y| Rgb([(x * 40) as u8, (y * 90) as u8, (x + y) as u8]));

        let channels = channels_from_rgb(&image).unwrap();
        assert_eq!(channels.red()[(2, 4)], 160);
        assert_eq!(channels.green()[(2, 4)], 180);
        assert_eq!(rgb_from_channels(&channels).unwrap(), image);
    }
}
