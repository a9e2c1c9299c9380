//! Seed data loaded once at store construction.

use chrono::Utc;

use charkha_core::{Amount, Email, Phone, ProductCategory, ProductId, UserId};

use super::memory::Tables;
use crate::models::{Product, User};

// Seed rows are hand-written literals; a malformed one is a programmer
// error worth failing loudly on at startup.
#[allow(clippy::unwrap_used)]
pub(crate) fn load(tables: &mut Tables) {
    let admin = User {
        id: UserId::generate(),
        phone: Phone::parse("+919999999999").unwrap(),
        name: Some("Admin User".to_owned()),
        email: Some(Email::parse("admin@charkha.store").unwrap()),
        is_admin: true,
        otp_code: None,
        otp_expires_at: None,
        otp_attempts: 0,
        created_at: Utc::now(),
    };
    tables.users.insert(admin.id, admin);

    let products = [
        Product {
            id: ProductId::generate(),
            name: "Premium Black Kurta".to_owned(),
            description: "Handcrafted from premium cotton blend, this elegant black kurta \
                          combines traditional craftsmanship with modern style. Relaxed fit, \
                          classic collar, intricate button details."
                .to_owned(),
            price: Amount::from_minor(249_900),
            image: "/assets/products/black-kurta.png".to_owned(),
            category: ProductCategory::Kurta,
            sizes: ["S", "M", "L", "XL", "XXL"].map(str::to_owned).to_vec(),
            in_stock: true,
            featured: true,
            created_at: Utc::now(),
        },
        Product {
            id: ProductId::generate(),
            name: "Essential White Cotton Shirt".to_owned(),
            description: "A timeless wardrobe essential. Made from 100% pure Indian cotton \
                          with a classic collar and comfortable fit."
                .to_owned(),
            price: Amount::from_minor(129_900),
            image: "/assets/products/white-shirt.png".to_owned(),
            category: ProductCategory::Shirt,
            sizes: ["XS", "S", "M", "L", "XL"].map(str::to_owned).to_vec(),
            in_stock: true,
            featured: true,
            created_at: Utc::now(),
        },
        Product {
            id: ProductId::generate(),
            name: "Traditional Gray Kurta".to_owned(),
            description: "Ultimate comfort meets traditional design. Charcoal gray with \
                          elegant patterns, a spacious pocket and soft handwoven fabric."
                .to_owned(),
            price: Amount::from_minor(279_900),
            image: "/assets/products/gray-kurta.png".to_owned(),
            category: ProductCategory::Kurta,
            sizes: ["M", "L", "XL", "XXL"].map(str::to_owned).to_vec(),
            in_stock: true,
            featured: false,
            created_at: Utc::now(),
        },
        Product {
            id: ProductId::generate(),
            name: "Vibrant Orange Casual Shirt".to_owned(),
            description: "Make a statement with premium fabric and a modern cut, designed \
                          to add a pop of color for festive occasions."
                .to_owned(),
            price: Amount::from_minor(149_900),
            image: "/assets/products/orange-shirt.png".to_owned(),
            category: ProductCategory::Shirt,
            sizes: ["S", "M", "L", "XL"].map(str::to_owned).to_vec(),
            in_stock: true,
            featured: true,
            created_at: Utc::now(),
        },
    ];

    for product in products {
        tables.products.insert(product.id, product);
    }
}
