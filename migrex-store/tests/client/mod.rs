use migrex_store::{Client, ColumnDefinition, StoreError, TableDefinition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub published: bool,
    pub pages: Option<i64>,
}

impl Book {
    pub fn new(title: impl Into<String>, published: bool) -> Self {
        Self {
            id: None,
            title: title.into(),
            published,
            pages: None,
        }
    }
}

pub fn books_definition() -> TableDefinition {
    TableDefinition::new()
        .column("id", ColumnDefinition::number().primary_key())
        .column("title", ColumnDefinition::string().required())
        .column("published", ColumnDefinition::boolean().required())
        .column("pages", ColumnDefinition::number())
        .index_by(["title"])
}

pub async fn init(client: &Client, table: &str) -> anyhow::Result<()> {
    if client.is_table_exists(table).await? {
        client.drop_table(table).await?;
    }

    client.create_table(table, &books_definition()).await?;

    Ok(())
}

pub async fn test_table_lifecycle(client: &Client, table: &str) -> anyhow::Result<()> {
    assert!(client.is_table_exists(table).await?);

    let err = client
        .create_table(table, &books_definition())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::TableAlreadyExists(name) if name == table));

    client.drop_table(table).await?;
    assert!(!client.is_table_exists(table).await?);

    let err = client.find_all::<Book>(table).await.unwrap_err();
    assert!(matches!(err, StoreError::TableNotFound(_)));

    Ok(())
}

pub async fn test_save(client: &Client, table: &str) -> anyhow::Result<()> {
    let dune = client.save(table, &Book::new("Dune", true)).await?;
    let hyperion = client.save(table, &Book::new("Hyperion", false)).await?;

    assert_eq!(dune.title, "Dune");
    assert!(dune.id.is_some());
    assert!(hyperion.id.is_some());
    assert_ne!(dune.id, hyperion.id);

    let mut books = client.find_all::<Book>(table).await?;
    books.sort_by(|a, b| a.title.cmp(&b.title));

    assert_eq!(books, vec![dune, hyperion]);

    Ok(())
}

pub async fn test_find(client: &Client, table: &str) -> anyhow::Result<()> {
    client.save(table, &Book::new("Dune", true)).await?;
    client.save(table, &Book::new("Dune", false)).await?;
    client.save(table, &Book::new("Solaris", true)).await?;

    let dunes = client.find_many::<Book, _>(table, "title", "Dune").await?;
    assert_eq!(dunes.len(), 2);

    let published = client.find_many::<Book, _>(table, "published", true).await?;
    assert_eq!(published.len(), 2);

    let solaris = client.find::<Book, _>(table, "title", "Solaris").await?;
    assert_eq!(solaris.map(|b| b.title), Some("Solaris".to_owned()));

    let missing = client.find::<Book, _>(table, "title", "Ubik").await?;
    assert_eq!(missing, None);

    Ok(())
}

pub async fn test_delete(client: &Client, table: &str) -> anyhow::Result<()> {
    client.save(table, &Book::new("Dune", true)).await?;
    client.save(table, &Book::new("Solaris", true)).await?;

    client.delete(table, "title", "Dune").await?;

    let books = client.find_all::<Book>(table).await?;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Solaris");

    Ok(())
}
