use reserves_sync::canvas::{CanvasClient, CanvasHttpClient};
use reserves_sync::config::SyncConfig;
use reserves_sync::error::AppError;
use reserves_sync::leganto::{LegantoClient, LegantoHttpClient};

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_list_courses_from_canvas() {
    dotenvy::dotenv().ok();

    let config = SyncConfig::new_from_env().expect("Failed to load config");
    let canvas = CanvasHttpClient::new(config.canvas.clone()).expect("Failed to create Canvas client");

    let account = config
        .run
        .accounts
        .first()
        .expect("CANVAS_ACCOUNTS should name at least one account");
    let listing = canvas.list_courses(account, &config.run.search_term).await;
    println!(
        "Fetched {} courses over {} pages from account {}",
        listing.items.len(),
        listing.pages,
        account
    );

    assert!(!listing.is_truncated(), "Listing stopped early: {:?}", listing.error);
    for course in listing.items.iter().filter_map(|entry| entry.as_ref().ok()) {
        println!(
            "ID: {}, SIS: {}, Name: {}, Term: {}",
            course.id,
            course.sis_course_id.as_deref().unwrap_or("N/A"),
            course.name,
            course.term.as_ref().map(|t| t.name.as_str()).unwrap_or("N/A")
        );
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_lookup_first_canvas_course_in_leganto() {
    dotenvy::dotenv().ok();

    let config = SyncConfig::new_from_env().expect("Failed to load config");
    let canvas = CanvasHttpClient::new(config.canvas.clone()).expect("Failed to create Canvas client");
    let leganto = LegantoHttpClient::new(config.leganto.clone()).expect("Failed to create Leganto client");

    let account = config.run.accounts.first().expect("No account configured");
    let listing = canvas.list_courses(account, &config.run.search_term).await;
    let Some(code) = listing
        .items
        .iter()
        .filter_map(|entry| entry.as_ref().ok())
        .find_map(|c| c.sis_course_id.clone())
    else {
        println!("No course with a SIS id in account {}", account);
        return;
    };

    match leganto.find_by_code(&code).await {
        Ok(record) => {
            println!("{} -> Leganto course {}", code, record.id);
            assert!(!record.id.is_empty());
        }
        Err(AppError::NotFound(_)) => println!("{} is not in Leganto", code),
        Err(e) => panic!("Leganto lookup failed: {}", e),
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_unknown_code_is_not_found_in_leganto() {
    dotenvy::dotenv().ok();

    let config = SyncConfig::new_from_env().expect("Failed to load config");
    let leganto = LegantoHttpClient::new(config.leganto).expect("Failed to create Leganto client");

    let result = leganto.find_by_code("NO_SUCH_COURSE_ZZ999").await;
    assert!(matches!(result, Err(AppError::NotFound(_))), "got {:?}", result);
}
