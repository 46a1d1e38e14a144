//! Demo data: one account per role and a small catalog.
//!
//! Seeding is idempotent. Accounts are skipped when their email exists and
//! courses when a course with the same title exists.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;

use coursegate_core::{AppError, DomainError};
use coursegate_db::slug::insert_with_unique_slug;
use coursegate_db::{CourseStore, UserStore};
use coursegate_models::{Class, Course, CourseId, Module, Role, normalize_audience};

use crate::modules::users::UserService;

/// Password shared by every seeded account.
pub const DEMO_PASSWORD: &str = "password123";

pub struct UserSeed {
    pub name: &'static str,
    pub email: &'static str,
    pub role: Role,
}

pub const DEMO_USERS: [UserSeed; 4] = [
    UserSeed {
        name: "Welcome User",
        email: "welcome@cpsacademy.com",
        role: Role::Normal,
    },
    UserSeed {
        name: "Sandra Student",
        email: "student@cpsacademy.com",
        role: Role::Student,
    },
    UserSeed {
        name: "Sam Social",
        email: "smm@cpsacademy.com",
        role: Role::SocialManager,
    },
    UserSeed {
        name: "Devon Developer",
        email: "dev@cpsacademy.com",
        role: Role::Developer,
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users_created: usize,
    pub users_skipped: usize,
    pub courses_created: usize,
    pub courses_skipped: usize,
}

pub async fn seed_database(
    users: &dyn UserStore,
    courses: &dyn CourseStore,
) -> Result<SeedReport, AppError> {
    let start_time = Instant::now();
    let mut report = SeedReport::default();

    println!("🌱 Seeding demo data...");

    for seed in &DEMO_USERS {
        match UserService::create(users, seed.email, seed.name, seed.role, DEMO_PASSWORD).await {
            Ok(_) => {
                report.users_created += 1;
                println!("   ✓ {} ({})", seed.email, seed.role);
            }
            Err(err) if err.domain() == Some(&DomainError::EmailConflict) => {
                report.users_skipped += 1;
                println!("   - {} already exists", seed.email);
            }
            Err(err) => return Err(err),
        }
    }

    let mut existing = HashSet::new();
    for role in Role::ALL {
        existing.extend(
            courses
                .list_courses_for(role)
                .await?
                .into_iter()
                .map(|course| course.title),
        );
    }

    for course in demo_courses() {
        if existing.contains(&course.title) {
            report.courses_skipped += 1;
            println!("   - \"{}\" already exists", course.title);
            continue;
        }

        let saved = insert_with_unique_slug(courses, course).await?;
        report.courses_created += 1;
        println!("   ✓ \"{}\" at /courses/{}", saved.title, saved.slug);
    }

    println!(
        "\n✅ Seeding finished in {:.2?}: {} users, {} courses created",
        start_time.elapsed(),
        report.users_created,
        report.courses_created
    );
    println!("   All demo accounts use the password \"{}\"", DEMO_PASSWORD);

    Ok(report)
}

pub fn demo_courses() -> Vec<Course> {
    vec![
        course(
            "UX Fundamentals",
            "Design delightful experiences with user-centered strategies.",
            Role::ALL.to_vec(),
            vec![
                module(
                    "Human-Centered Design",
                    &["Personas & Empathy Maps", "Problem Statements", "Value Propositions"],
                    class(
                        "Design Principles 101",
                        35,
                        "https://www.youtube.com/watch?v=3Yyllfd_ojc",
                    ),
                ),
                module(
                    "Rapid Prototyping",
                    &["Storyboarding", "Low-fi Prototypes", "Usability Testing"],
                    class(
                        "Prototyping Crash Course",
                        42,
                        "https://www.youtube.com/watch?v=Qz0KTgyj9K0",
                    ),
                ),
            ],
        ),
        course(
            "Modern Web Platform",
            "Ship production-grade apps with React, Node.js, and cloud tooling.",
            vec![Role::Student, Role::Developer],
            vec![
                module(
                    "Advanced React Patterns",
                    &["Hooks Deep Dive", "Suspense", "Error Boundaries"],
                    class(
                        "Performance Profiling",
                        48,
                        "https://www.youtube.com/watch?v=dpw9EHDh2bM",
                    ),
                ),
                module(
                    "Node.js Production Essentials",
                    &["RESTful APIs", "Security Hardening", "Observability"],
                    class(
                        "Node Deployment on Railway",
                        39,
                        "https://www.youtube.com/watch?v=RGKi6LSPDLU",
                    ),
                ),
            ],
        ),
        course(
            "Brand Storytelling for Social Media",
            "Craft shareable narratives that grow communities across platforms.",
            vec![Role::SocialManager, Role::Normal],
            vec![
                module(
                    "Narrative Frameworks",
                    &["Hero's Journey", "Story Arcs", "Content Pillars"],
                    class(
                        "Magnetic Social Hooks",
                        27,
                        "https://www.youtube.com/watch?v=JfIqv5a8XDA",
                    ),
                ),
                module(
                    "Analytics & Iteration",
                    &["A/B Testing", "Listening Tools", "Reporting Dashboards"],
                    class(
                        "Measuring Story Impact",
                        31,
                        "https://www.youtube.com/watch?v=2JYT5f2isg4",
                    ),
                ),
            ],
        ),
    ]
}

fn course(title: &str, description: &str, audience: Vec<Role>, modules: Vec<Module>) -> Course {
    let now = Utc::now();
    Course {
        id: CourseId::new(),
        title: title.to_string(),
        slug: String::new(),
        description: description.to_string(),
        audience: normalize_audience(Some(audience)),
        modules,
        created_at: now,
        updated_at: now,
    }
}

fn module(title: &str, topics: &[&str], class: Class) -> Module {
    Module {
        title: title.to_string(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        classes: vec![class],
    }
}

fn class(title: &str, duration: u32, recording_url: &str) -> Class {
    Class {
        title: title.to_string(),
        duration,
        recording_url: Some(recording_url.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursegate_db::MemoryStore;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryStore::new();

        let first = seed_database(&store, &store).await.unwrap();
        assert_eq!(first.users_created, 4);
        assert_eq!(first.courses_created, 3);

        let second = seed_database(&store, &store).await.unwrap();
        assert_eq!(second.users_created, 0);
        assert_eq!(second.users_skipped, 4);
        assert_eq!(second.courses_created, 0);
        assert_eq!(second.courses_skipped, 3);
    }

    #[tokio::test]
    async fn test_seeded_catalog_is_role_filtered() {
        let store = MemoryStore::new();
        seed_database(&store, &store).await.unwrap();

        let student: Vec<_> = store
            .list_courses_for(Role::Student)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(student, vec!["ux-fundamentals", "modern-web-platform"]);

        let social: Vec<_> = store
            .list_courses_for(Role::SocialManager)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(
            social,
            vec!["ux-fundamentals", "brand-storytelling-for-social-media"]
        );
    }

    #[test]
    fn test_demo_courses_pass_validation() {
        use validator::Validate;

        for course in demo_courses() {
            for module in &course.modules {
                assert!(module.validate().is_ok(), "{}", module.title);
            }
        }
    }
}
