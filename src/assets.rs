//! Naming of design images kept in the remote media store

use serde::Serialize;

use crate::domain::value_objects::{DesignSide, OrderId};

/// Where an uploaded design image for one product of an order lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignAsset {
    pub order_id: OrderId,
    pub side: DesignSide,
    pub product_index: usize,
}

impl DesignAsset {
    pub fn new(order_id: OrderId, side: DesignSide, product_index: usize) -> Self {
        Self { order_id, side, product_index }
    }

    /// `{orderId}-{designType}-{productIndex}`
    pub fn file_name(&self) -> String {
        format!("{}-{}-{}", self.order_id, self.side, self.product_index)
    }

    pub fn folder(&self, root: &str) -> String {
        let folder = match self.side {
            DesignSide::Front => "frontDesign",
            DesignSide::Back => "backDesign",
            DesignSide::Predesigned => "predesigned",
        };
        format!("{root}/{folder}")
    }

    pub fn public_id(&self, root: &str) -> String {
        format!("{}/{}", self.folder(root), self.file_name())
    }
}

/// Location info handed back to clients after a design is registered.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLocation {
    pub file_name: String,
    pub folder: String,
    pub public_id: String,
}

#[derive(Clone, Debug)]
pub struct MediaLibrary {
    cloud_name: String,
    root: String,
}

impl MediaLibrary {
    pub fn new(cloud_name: impl Into<String>, root: impl Into<String>) -> Self {
        Self { cloud_name: cloud_name.into(), root: root.into() }
    }

    pub fn root(&self) -> &str { &self.root }

    pub fn delivery_url(&self, public_id: &str) -> String {
        format!("https://res.cloudinary.com/{}/image/upload/{}", self.cloud_name, public_id)
    }

    pub fn template_path(&self, template_id: &str) -> String {
        format!("{}/predesigned/{}", self.root, template_id)
    }

    pub fn locate(&self, asset: &DesignAsset) -> AssetLocation {
        AssetLocation { file_name: asset.file_name(), folder: asset.folder(&self.root), public_id: asset.public_id(&self.root) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_naming() {
        let asset = DesignAsset::new(OrderId::parse("1234").unwrap(), DesignSide::Back, 2);
        assert_eq!(asset.file_name(), "01234-back-2");
        assert_eq!(asset.public_id("yhe"), "yhe/backDesign/01234-back-2");
    }

    #[test]
    fn test_media_urls() {
        let media = MediaLibrary::new("shop-cloud", "yhe");
        assert_eq!(media.template_path("no-be-beans"), "yhe/predesigned/no-be-beans");
        assert_eq!(
            media.delivery_url("yhe/frontDesign/00001-front-0"),
            "https://res.cloudinary.com/shop-cloud/image/upload/yhe/frontDesign/00001-front-0"
        );
        let location = media.locate(&DesignAsset::new(OrderId::parse("1").unwrap(), DesignSide::Front, 0));
        assert_eq!(location.folder, "yhe/frontDesign");
    }
}
