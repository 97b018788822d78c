use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Store aisle used when the catalog knows nothing about an ingredient
#[derive(
    EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq,
)]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Pantry,
    Frozen,
    Bakery,
    Other,
}

const PRODUCE: &[&str] = &[
    "tomato", "onion", "garlic", "lettuce", "carrot", "celery", "bell pepper", "cucumber",
    "zucchini", "broccoli", "cauliflower", "spinach", "kale", "cabbage", "potato",
    "sweet potato", "mushroom", "green bean", "pea", "corn", "avocado", "eggplant", "squash",
    "jalapeno", "ginger", "cilantro", "parsley", "basil", "mint", "thyme", "rosemary", "apple",
    "banana", "orange", "lemon", "lime", "strawberry", "blueberry", "raspberry", "grape",
    "mango", "pineapple", "watermelon", "shallot", "leek", "scallion",
];

const DAIRY: &[&str] = &[
    "milk", "cream", "heavy cream", "sour cream", "butter", "cheese", "cheddar", "mozzarella",
    "parmesan", "feta", "goat cheese", "cream cheese", "yogurt", "greek yogurt",
    "cottage cheese", "ricotta", "egg",
];

const MEAT: &[&str] = &[
    "chicken", "chicken breast", "chicken thigh", "turkey", "duck", "beef", "ground beef",
    "steak", "brisket", "pork", "bacon", "ham", "sausage", "pork chop", "fish", "salmon",
    "tuna", "cod", "tilapia", "shrimp", "prawn", "lobster", "crab", "scallop", "lamb", "veal",
];

const PANTRY: &[&str] = &[
    "flour", "rice", "brown rice", "pasta", "spaghetti", "penne", "noodle", "oat", "quinoa",
    "couscous", "lentil", "sugar", "brown sugar", "baking powder", "baking soda", "yeast",
    "vanilla extract", "cocoa powder", "chocolate chip", "olive oil", "vegetable oil",
    "coconut oil", "vinegar", "balsamic vinegar", "soy sauce", "ketchup", "mustard",
    "mayonnaise", "hot sauce", "salt", "pepper", "black pepper", "paprika", "cumin",
    "coriander", "turmeric", "cinnamon", "nutmeg", "oregano", "chili powder", "garlic powder",
    "onion powder", "tomato sauce", "tomato paste", "canned tomato", "chicken broth",
    "beef broth", "vegetable broth", "bean", "black bean", "kidney bean", "chickpea",
    "peanut butter", "jam", "honey", "maple syrup", "almond", "walnut", "pecan", "cashew",
    "peanut", "chia seed", "coconut milk",
];

const FROZEN: &[&str] = &["ice cream", "frozen pizza", "french fry", "frozen vegetable"];

const BAKERY: &[&str] = &[
    "bread", "baguette", "ciabatta", "sourdough", "tortilla", "pita", "bagel", "croissant",
    "bun", "roll",
];

/// Keyword categorisation on the singular form of the name. Anything prefixed
/// with "frozen " is frozen.
pub fn categorize(name: &str) -> Category {
    let name = crate::normalize_name(name);

    if name.starts_with("frozen ") {
        return Category::Frozen;
    }

    let candidates = [
        Some(name.to_owned()),
        name.strip_suffix("ies").map(|stem| format!("{stem}y")),
        name.strip_suffix("es").map(ToOwned::to_owned),
        name.strip_suffix('s').map(ToOwned::to_owned),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| lookup(&candidate))
        .unwrap_or(Category::Other)
}

fn lookup(name: &str) -> Option<Category> {
    [
        (Category::Frozen, FROZEN),
        (Category::Pantry, PANTRY),
        (Category::Produce, PRODUCE),
        (Category::Dairy, DAIRY),
        (Category::Meat, MEAT),
        (Category::Bakery, BAKERY),
    ]
    .into_iter()
    .find(|(_, words)| words.contains(&name))
    .map(|(category, _)| category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_common_ingredients() {
        let ingredients = [
            ("tomato", Category::Produce),
            ("tomatoes", Category::Produce),
            ("garlic", Category::Produce),
            ("bell peppers", Category::Produce),
            ("strawberries", Category::Produce),
            ("milk", Category::Dairy),
            ("eggs", Category::Dairy),
            ("parmesan", Category::Dairy),
            ("chicken breasts", Category::Meat),
            ("shrimp", Category::Meat),
            ("flour", Category::Pantry),
            ("olive oil", Category::Pantry),
            ("garlic powder", Category::Pantry),
            ("chickpeas", Category::Pantry),
            ("frozen peas", Category::Frozen),
            ("ice cream", Category::Frozen),
            ("bread", Category::Bakery),
            ("tortillas", Category::Bakery),
        ];

        for (ingredient, expected) in ingredients {
            assert_eq!(categorize(ingredient), expected, "{ingredient}");
        }
    }

    #[test]
    fn test_categorize_case_and_whitespace() {
        assert_eq!(categorize("  TOMATO "), Category::Produce);
        assert_eq!(categorize("ChIcKeN"), Category::Meat);
    }

    #[test]
    fn test_categorize_unknown() {
        assert_eq!(categorize("unknown_ingredient"), Category::Other);
        assert_eq!(categorize(""), Category::Other);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Produce.to_string(), "Produce");
        assert_eq!(Category::Other.as_ref(), "Other");
    }
}
