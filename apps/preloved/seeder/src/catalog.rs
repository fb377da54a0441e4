//! The known product catalog, keyed by image frame id.
//!
//! Image filenames carry a frame id (e.g. `frame_1-30` inside
//! `frame_1-30.jpg`); a filename maps to the catalog entry whose frame id
//! it contains. Filenames with no known frame id are skipped.

use domain_products::CreateProduct;

/// A catalog entry waiting to be upserted
pub struct SeedProduct {
    pub frame_id: &'static str,
    pub name: &'static str,
    pub price: i64,
    pub original_price: i64,
    pub category: &'static str,
    pub condition: &'static str,
    pub description: &'static str,
    pub size: &'static str,
    pub brand: &'static str,
    pub color: &'static str,
    pub material: &'static str,
}

pub const SEED_CATALOG: [SeedProduct; 6] = [
    SeedProduct {
        frame_id: "frame_1-30",
        name: "Celana Jeans Vintage Levi's 501",
        price: 675000,
        original_price: 1335000,
        category: "pants",
        condition: "Good",
        description: "Celana jeans vintage Levi's 501 klasik dalam kondisi sangat baik",
        size: "32W x 32L",
        brand: "Levi's",
        color: "blue",
        material: "denim",
    },
    SeedProduct {
        frame_id: "frame_2-00",
        name: "Kaos Band Vintage",
        price: 375000,
        original_price: 600000,
        category: "shirts",
        condition: "Excellent",
        description: "Kaos band vintage asli, lembut dan nyaman",
        size: "L",
        brand: "Hanes",
        color: "black",
        material: "cotton",
    },
    SeedProduct {
        frame_id: "frame_2-30",
        name: "Blazer Wol",
        price: 825000,
        original_price: 2250000,
        category: "jackets",
        condition: "Good",
        description: "Blazer wol profesional, cocok untuk keperluan kantor",
        size: "M",
        brand: "Brooks Brothers",
        color: "navy",
        material: "wool",
    },
    SeedProduct {
        frame_id: "frame_3-00",
        name: "Dress Musim Panas Motif Bunga",
        price: 525000,
        original_price: 1200000,
        category: "dresses",
        condition: "Excellent",
        description: "Dress cantik dengan motif bunga untuk musim panas, ringan dan mengalir",
        size: "S",
        brand: "Zara",
        color: "floral",
        material: "polyester",
    },
    SeedProduct {
        frame_id: "frame_3-20",
        name: "Celana Chino Khaki",
        price: 420000,
        original_price: 975000,
        category: "pants",
        condition: "Good",
        description: "Celana chino khaki yang nyaman, cocok untuk pakaian kasual",
        size: "34W x 30L",
        brand: "Gap",
        color: "khaki",
        material: "cotton",
    },
    SeedProduct {
        frame_id: "frame_4-00",
        name: "Sweater Oversized",
        price: 480000,
        original_price: 1125000,
        category: "shirts",
        condition: "Excellent",
        description: "Sweater oversized yang hangat, sempurna untuk layering",
        size: "M",
        brand: "H&M",
        color: "cream",
        material: "acrylic",
    },
];

/// Find the catalog entry whose frame id appears in the filename
pub fn resolve_frame(filename: &str) -> Option<&'static SeedProduct> {
    SEED_CATALOG
        .iter()
        .find(|entry| filename.contains(entry.frame_id))
}

impl SeedProduct {
    /// Build the CreateProduct DTO for this entry, pointing at the public
    /// image path the storefront serves
    pub fn to_create(&self, filename: &str) -> CreateProduct {
        CreateProduct {
            name: self.name.to_string(),
            price: self.price,
            original_price: Some(self.original_price),
            image: Some(format!("/images/{}", filename)),
            category: self.category.to_string(),
            condition: self.condition.to_string(),
            description: self.description.to_string(),
            size: Some(self.size.to_string()),
            brand: Some(self.brand.to_string()),
            color: Some(self.color.to_string()),
            material: Some(self.material.to_string()),
        }
    }

    /// Text fed to the embedding encoder for this entry
    pub fn embedding_text(&self) -> String {
        embedding::build_embedding_text(
            self.name,
            self.category,
            Some(self.brand),
            Some(self.color),
            Some(self.material),
            self.description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_frame_id_by_substring() {
        let entry = resolve_frame("frame_2-30.jpg").expect("known frame");
        assert_eq!(entry.name, "Blazer Wol");

        // The frame id can appear anywhere in the filename
        let entry = resolve_frame("copy_of_frame_3-20_final.jpg").expect("known frame");
        assert_eq!(entry.name, "Celana Chino Khaki");
    }

    #[test]
    fn unknown_frames_resolve_to_none() {
        assert!(resolve_frame("frame_9-99.jpg").is_none());
        assert!(resolve_frame("portrait.jpg").is_none());
    }

    #[test]
    fn to_create_points_at_public_image_path() {
        let entry = resolve_frame("frame_1-30.jpg").unwrap();
        let input = entry.to_create("frame_1-30.jpg");

        assert_eq!(input.image.as_deref(), Some("/images/frame_1-30.jpg"));
        assert_eq!(input.price, 675000);
        assert_eq!(input.original_price, Some(1335000));
        assert_eq!(input.brand.as_deref(), Some("Levi's"));
    }

    #[test]
    fn embedding_text_folds_in_catalog_fields() {
        let entry = resolve_frame("frame_4-00.jpg").unwrap();
        let text = entry.embedding_text();

        assert!(text.contains("Sweater Oversized"));
        assert!(text.contains("shirts"));
        assert!(text.contains("H&M"));
    }
}
