use vitrine_base::AccentColor;

use crate::{ProductCategory, ProductDescriptor, SpecEntry};

pub(crate) fn products() -> Vec<ProductDescriptor> {
    vec![
        ProductDescriptor::new(
            "Premium Headphones",
            "$299.99",
            "Experience crystal-clear audio with our premium wireless headphones featuring advanced noise cancellation and 30-hour battery life.",
            ProductCategory::Headphones,
            vec![
                SpecEntry::new("Battery Life", "30 hours"),
                SpecEntry::new("Weight", "250g"),
                SpecEntry::new("Connectivity", "Bluetooth 5.0"),
                SpecEntry::new("Warranty", "2 years"),
            ],
            AccentColor::from_hex(0x2563eb),
        ),
        ProductDescriptor::new(
            "Pro Smartphone",
            "$899.99",
            "Cutting-edge smartphone with triple-camera system, A17 Pro chip, and stunning 6.7-inch display with 120Hz refresh rate.",
            ProductCategory::Phone,
            vec![
                SpecEntry::new("Display", "6.7-inch OLED"),
                SpecEntry::new("Storage", "256GB"),
                SpecEntry::new("Camera", "48MP Triple"),
                SpecEntry::new("Battery", "4000mAh"),
            ],
            AccentColor::from_hex(0x1f2937),
        ),
        ProductDescriptor::new(
            "Smart Watch Ultra",
            "$449.99",
            "Advanced fitness tracking, heart rate monitoring, GPS navigation, and 7-day battery life in a premium titanium case.",
            ProductCategory::Watch,
            vec![
                SpecEntry::new("Display", "1.9-inch Retina"),
                SpecEntry::new("Battery", "7 days"),
                SpecEntry::new("Water Resistance", "50m"),
                SpecEntry::new("Material", "Titanium"),
            ],
            AccentColor::from_hex(0x7c3aed),
        ),
        ProductDescriptor::new(
            "MacBook Ultra",
            "$1,999.99",
            "Powerful laptop with M3 chip, 16-inch Liquid Retina display, and up to 22-hour battery life for professional workflows.",
            ProductCategory::Laptop,
            vec![
                SpecEntry::new("Processor", "M3 Pro"),
                SpecEntry::new("Memory", "32GB"),
                SpecEntry::new("Storage", "1TB SSD"),
                SpecEntry::new("Display", "16-inch Retina"),
            ],
            AccentColor::from_hex(0x6b7280),
        ),
    ]
}
