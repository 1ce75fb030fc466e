use anyhow::Result;
use pubadmin_types::Publication;
use reqwest::Url;
use serde_json::json;
use tracing::info;

pub async fn create_publication(
    client: &reqwest::Client,
    base_url: &Url,
    title: &str,
    release_date: &str,
) -> Result<Publication> {
    let payload = json!({
        "title": title,
        "releaseDate": release_date,
        "coverUrl": format!("https://img.example.org/{}.png", title.len()),
    });
    let api_url = base_url.join("api/publication")?;

    let response = client.post(api_url).json(&payload).send().await?;
    info!("Response: {:#?}", response);
    assert!(response.status().is_success());
    assert_eq!(response.status().as_u16(), 201);

    let new_publication: Publication = response.json().await?;
    Ok(new_publication)
}
