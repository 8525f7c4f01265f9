use crate::inventory::Inventory;
use crate::models::{Part, Product};

/// Builds a small demonstration catalog: a few bicycle and car parts and
/// four products, the first of which uses three of the parts.
pub fn sample_inventory() -> Inventory {
    let mut inventory = Inventory::new();

    inventory.add_part(Part::in_house(1, "wheel", 2.50, 15, 0, 15, 1234));
    inventory.add_part(Part::outsourced(2, "Handlebars", 1.2, 3, 0, 10, "Wheeler's Co."));
    inventory.add_part(Part::outsourced(3, "Door", 4.2, 1, 0, 4, "Door Co."));
    inventory.add_part(Part::in_house(4, "Screw", 0.5, 100, 10, 500, 3214));

    let mut car = Product::new(1, "car", 10_000.0, 3, 1, 10);
    car.add_associated_part(1);
    car.add_associated_part(2);
    car.add_associated_part(3);
    inventory.add_product(car);

    inventory.add_product(Product::new(2, "Bicycle", 99.99, 12, 0, 15));
    inventory.add_product(Product::new(3, "Some Product", 25.5, 3, 1, 6));
    inventory.add_product(Product::new(4, "Expensive and Rare", 400.99, 1, 0, 1));

    inventory
}
