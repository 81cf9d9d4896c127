//! Expense categories offered by the add-expense form
//!
//! Files may contain any category text; this list only seeds the picker.

pub const DEFAULT_CATEGORIES: [&str; 22] = [
    "Продукты питания",
    "Коммунальные услуги",
    "Аренда жилья",
    "Транспорт",
    "Кредит машина",
    "Кредит Ирина",
    "Кредитка Сбер",
    "Кредитка Тиньков",
    "Платеж Дмитрию",
    "Здоровье и медицина",
    "Образование",
    "Хобби и развлечения",
    "Спорт и фитнес",
    "Одежда и обувь",
    "Красота и уход",
    "Подарки",
    "Электроника",
    "Программное обеспечение",
    "Непредвиденные расходы",
    "Накопления",
    "Инвестиции",
    "Другое",
];

/// Check whether a category is one of the defaults (case-insensitive)
pub fn is_default_category(name: &str) -> bool {
    let needle = name.trim().to_lowercase();
    DEFAULT_CATEGORIES
        .iter()
        .any(|c| c.to_lowercase() == needle)
}
