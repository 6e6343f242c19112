// Copyright 2024 Popo Utility Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Image shape nodes: size, dimensions and aspect ratio

use super::descriptor::{InputField, NodeDescriptor, OutputKind};
use super::error::NodeResult;
use super::value::{NodeInputs, NodeOutputs, NodeValue};
use super::Node;
use crate::registry::functions::round_to_digits;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::LazyLock;

/// Distance within which a ratio takes a common name
pub const RATIO_TOLERANCE: f64 = 0.05;

/// Named aspect ratios, checked in order
pub const COMMON_RATIOS: [(f64, &str); 9] = [
    (1.0, "1:1 Square"),
    (4.0 / 3.0, "4:3 Standard"),
    (3.0 / 2.0, "3:2 Classic"),
    (16.0 / 9.0, "16:9 Widescreen"),
    (21.0 / 9.0, "21:9 Ultrawide"),
    (5.0 / 4.0, "5:4 Monitor"),
    (3.0 / 4.0, "3:4 Portrait Standard"),
    (2.0 / 3.0, "2:3 Portrait Classic"),
    (9.0 / 16.0, "9:16 Portrait Widescreen"),
];

/// Ratio name reported when the shape cannot be measured
pub const INVALID_RATIO_NAME: &str = "invalid";

/// Shape of an image tensor
///
/// Either `[batch, height, width, channels]` or `[height, width, channels]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageShape {
    dims: SmallVec<[usize; 4]>,
}

/// Width and height read from a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl ImageDimensions {
    /// Larger of width and height
    pub fn long_side(&self) -> usize {
        self.width.max(self.height)
    }

    /// Smaller of width and height
    pub fn short_side(&self) -> usize {
        self.width.min(self.height)
    }

    /// Width over height; `None` when either side is zero
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.width != 0 && self.height != 0).then(|| self.width as f64 / self.height as f64)
    }
}

impl ImageShape {
    /// Shape from its dimensions
    pub fn new(dims: impl IntoIterator<Item = usize>) -> Self {
        Self {
            dims: dims.into_iter().collect(),
        }
    }

    /// Raw dimensions
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Width and height for rank-3 and rank-4 shapes
    pub fn dimensions(&self) -> Option<ImageDimensions> {
        match self.dims.as_slice() {
            [_, height, width, _] | [height, width, _] => Some(ImageDimensions {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for ImageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.dims.as_slice())
    }
}

/// Common name of `ratio`, or a landscape/portrait description
pub fn ratio_name(ratio: f64) -> String {
    if let Some((_, name)) = COMMON_RATIOS
        .iter()
        .find(|(target, _)| (ratio - target).abs() <= RATIO_TOLERANCE)
    {
        return (*name).to_string();
    }
    if ratio > 1.0 {
        format!("{ratio:.2}:1 Landscape")
    } else {
        format!("1:{:.2} Portrait", 1.0 / ratio)
    }
}

fn side(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Popo Image Size: long and short side of an image
#[derive(Debug, Default, Clone, Copy)]
pub struct PopoImageSizeNode;

impl PopoImageSizeNode {
    /// `(long_side, short_side)`; zeros for unsupported shapes
    pub fn get_image_size(&self, image: &ImageShape) -> (i64, i64) {
        match image.dimensions() {
            Some(dims) => (side(dims.long_side()), side(dims.short_side())),
            None => {
                log::warn!("PopoImageSizeNode: unsupported image shape {image}");
                (0, 0)
            }
        }
    }
}

impl Node for PopoImageSizeNode {
    fn descriptor(&self) -> &NodeDescriptor {
        static DESCRIPTOR: LazyLock<NodeDescriptor> = LazyLock::new(|| {
            NodeDescriptor::new(
                "PopoImageSizeNode",
                "Popo Image Size",
                "get_image_size",
                "Long and short side of an image",
            )
            .input(InputField::image("image"))
            .output("long_side", OutputKind::Int)
            .output("short_side", OutputKind::Int)
        });
        &DESCRIPTOR
    }

    fn invoke(&self, inputs: &NodeInputs) -> NodeResult<NodeOutputs> {
        let (long, short) = self.get_image_size(inputs.image(self.class_name(), "image")?);
        Ok(NodeOutputs::new(vec![NodeValue::Int(long), NodeValue::Int(short)]))
    }
}

/// Popo Image Dimensions: width, height, long and short side
#[derive(Debug, Default, Clone, Copy)]
pub struct PopoImageDimensionsNode;

impl PopoImageDimensionsNode {
    /// `(width, height, long_side, short_side)`; zeros for unsupported shapes
    pub fn get_dimensions(&self, image: &ImageShape) -> (i64, i64, i64, i64) {
        match image.dimensions() {
            Some(dims) => (
                side(dims.width),
                side(dims.height),
                side(dims.long_side()),
                side(dims.short_side()),
            ),
            None => {
                log::warn!("PopoImageDimensionsNode: unsupported image shape {image}");
                (0, 0, 0, 0)
            }
        }
    }
}

impl Node for PopoImageDimensionsNode {
    fn descriptor(&self) -> &NodeDescriptor {
        static DESCRIPTOR: LazyLock<NodeDescriptor> = LazyLock::new(|| {
            NodeDescriptor::new(
                "PopoImageDimensionsNode",
                "Popo Image Dimensions",
                "get_dimensions",
                "Width, height, long side and short side of an image",
            )
            .input(InputField::image("image"))
            .output("width", OutputKind::Int)
            .output("height", OutputKind::Int)
            .output("long_side", OutputKind::Int)
            .output("short_side", OutputKind::Int)
        });
        &DESCRIPTOR
    }

    fn invoke(&self, inputs: &NodeInputs) -> NodeResult<NodeOutputs> {
        let (width, height, long, short) =
            self.get_dimensions(inputs.image(self.class_name(), "image")?);
        Ok([width, height, long, short]
            .into_iter()
            .map(NodeValue::Int)
            .collect())
    }
}

/// Popo Image Aspect Ratio: width/height and its common name
#[derive(Debug, Default, Clone, Copy)]
pub struct PopoImageAspectRatioNode;

impl PopoImageAspectRatioNode {
    /// `(ratio rounded to 3 decimals, name)`; `(0.0, "invalid")` when the
    /// shape is unsupported or a side is zero
    pub fn calculate_aspect_ratio(&self, image: &ImageShape) -> (f64, String) {
        match image.dimensions().and_then(|dims| dims.aspect_ratio()) {
            Some(ratio) => (round_to_digits(ratio, 3), ratio_name(ratio)),
            None => {
                log::warn!("PopoImageAspectRatioNode: cannot measure image shape {image}");
                (0.0, INVALID_RATIO_NAME.to_string())
            }
        }
    }
}

impl Node for PopoImageAspectRatioNode {
    fn descriptor(&self) -> &NodeDescriptor {
        static DESCRIPTOR: LazyLock<NodeDescriptor> = LazyLock::new(|| {
            NodeDescriptor::new(
                "PopoImageAspectRatioNode",
                "Popo Image Aspect Ratio",
                "calculate_aspect_ratio",
                "Aspect ratio of an image and its common name",
            )
            .input(InputField::image("image"))
            .output("aspect_ratio", OutputKind::Float)
            .output("ratio_name", OutputKind::String)
        });
        &DESCRIPTOR
    }

    fn invoke(&self, inputs: &NodeInputs) -> NodeResult<NodeOutputs> {
        let (ratio, name) = self.calculate_aspect_ratio(inputs.image(self.class_name(), "image")?);
        Ok(NodeOutputs::new(vec![
            NodeValue::Float(ratio),
            NodeValue::String(name),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![1, 1080, 1920, 3], Some((1920, 1080)))]
    #[case(vec![768, 512, 3], Some((512, 768)))]
    #[case(vec![512, 512], None)]
    #[case(vec![1, 2, 3, 4, 5], None)]
    fn test_dimensions(#[case] dims: Vec<usize>, #[case] expected: Option<(usize, usize)>) {
        let read = ImageShape::new(dims)
            .dimensions()
            .map(|d| (d.width, d.height));
        assert_eq!(read, expected);
    }

    #[rstest]
    #[case(1.0, "1:1 Square")]
    #[case(1920.0 / 1080.0, "16:9 Widescreen")]
    #[case(1.3, "4:3 Standard")]
    #[case(0.75, "3:4 Portrait Standard")]
    #[case(2.0, "2.00:1 Landscape")]
    #[case(0.4, "1:2.50 Portrait")]
    fn test_ratio_name(#[case] ratio: f64, #[case] expected: &str) {
        assert_eq!(ratio_name(ratio), expected);
    }

    #[test]
    fn test_first_match_wins() {
        // 1.29 is within tolerance of both 4:3 (1.333) and 5:4 (1.25)
        assert_eq!(ratio_name(1.29), "4:3 Standard");
    }

    #[test]
    fn test_size_nodes() {
        let shape = ImageShape::new([1, 1080, 1920, 3]);
        assert_eq!(PopoImageSizeNode.get_image_size(&shape), (1920, 1080));
        assert_eq!(
            PopoImageDimensionsNode.get_dimensions(&shape),
            (1920, 1080, 1920, 1080)
        );
        assert_eq!(PopoImageSizeNode.get_image_size(&ImageShape::new([4, 4])), (0, 0));
    }

    #[test]
    fn test_aspect_ratio_node() {
        let node = PopoImageAspectRatioNode;
        assert_eq!(
            node.calculate_aspect_ratio(&ImageShape::new([1, 1080, 1920, 3])),
            (1.778, "16:9 Widescreen".to_string())
        );
        assert_eq!(
            node.calculate_aspect_ratio(&ImageShape::new([0, 1920, 3])),
            (0.0, "invalid".to_string())
        );
        assert_eq!(
            node.calculate_aspect_ratio(&ImageShape::new([7])),
            (0.0, "invalid".to_string())
        );
    }
}
