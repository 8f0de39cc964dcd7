//! Static course catalog served to the landing page.
//!
//! Built once on first access and never mutated afterwards, so handlers read
//! it concurrently without synchronization.

use std::sync::LazyLock;

use crate::models::Course;

static COURSES: LazyLock<Vec<Course>> = LazyLock::new(|| {
    vec![
        course(
            "starter",
            "Базовый монтаж",
            "Освойте основы монтажа и создавайте ролики за 2 недели",
            49.0,
            &[
                "Интерфейс Premiere Pro",
                "Работа с таймлайном",
                "С переходами и музыкой",
                "Экспорт роликов",
            ],
            "Новичок",
            2,
        ),
        course(
            "pro",
            "Профи монтаж",
            "Полный цикл монтажа: от сырья до готового видео",
            149.0,
            &[
                "Цветокоррекция",
                "Работа со звуком",
                "Motion-графика основы",
                "Скорость работы",
            ],
            "Средний",
            6,
        ),
        course(
            "master",
            "Мастер монтаж",
            "Креативные приемы и коммерческие проекты",
            299.0,
            &[
                "Сторителлинг",
                "Кейсы клиентов",
                "Motion Advanced",
                "Портфолио и клиенты",
            ],
            "Продвинутый",
            10,
        ),
    ]
});

fn course(
    id: &str,
    title: &str,
    subtitle: &str,
    price: f64,
    features: &[&str],
    level: &str,
    duration_weeks: u32,
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        price,
        features: features.iter().map(|f| f.to_string()).collect(),
        level: level.to_string(),
        duration_weeks,
        image: None,
    }
}

/// Returns every course in catalog order.
pub fn list_courses() -> &'static [Course] {
    &COURSES
}

/// Looks up a course by id.
pub fn find_course(id: &str) -> Option<&'static Course> {
    COURSES.iter().find(|c| c.id == id)
}
