// Fixtures for dbt manifest and catalog documents

use serde_json::{json, Map, Value};

/// A column defined on a model.
#[derive(Debug, Clone)]
pub struct ColumnFixture {
    pub name: String,
    pub description: String,
    pub col_type: String,
    pub index: Value,
    /// Whether the column exists in the catalog.
    pub materialized: bool,
}

impl ColumnFixture {
    pub fn new(name: &str, col_type: &str, index: i64) -> Self {
        Self {
            name: name.to_string(),
            description: format!("The {} column", name),
            col_type: col_type.to_string(),
            index: json!(index),
            materialized: true,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_index(mut self, index: Value) -> Self {
        self.index = index;
        self
    }

    /// Documented in the manifest only.
    pub fn not_materialized(mut self) -> Self {
        self.materialized = false;
        self
    }
}

/// A dbt node and its catalog entry.
#[derive(Debug, Clone)]
pub struct ModelFixture {
    pub resource_type: String,
    pub package: String,
    pub name: String,
    pub schema: Value,
    pub database: String,
    pub description: String,
    pub owner: Value,
    pub relation_type: String,
    pub columns: Vec<ColumnFixture>,
    /// Whether the node appears in the catalog.
    pub in_catalog: bool,
}

impl ModelFixture {
    pub fn new(schema: &str, name: &str) -> Self {
        Self {
            resource_type: "model".to_string(),
            package: "shop".to_string(),
            name: name.to_string(),
            schema: json!(schema),
            database: "ANALYTICS".to_string(),
            description: format!("The {} model", name),
            owner: Value::Null,
            relation_type: "BASE TABLE".to_string(),
            columns: Vec::new(),
            in_catalog: true,
        }
    }

    pub fn unique_id(&self) -> String {
        format!("{}.{}.{}", self.resource_type, self.package, self.name)
    }

    pub fn with_resource_type(mut self, resource_type: &str) -> Self {
        self.resource_type = resource_type.to_string();
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_owner(mut self, owner: Value) -> Self {
        self.owner = owner;
        self
    }

    pub fn as_view(mut self) -> Self {
        self.relation_type = "VIEW".to_string();
        self
    }

    pub fn with_column(mut self, column: ColumnFixture) -> Self {
        self.columns.push(column);
        self
    }

    pub fn not_in_catalog(mut self) -> Self {
        self.in_catalog = false;
        self
    }

    fn manifest_node(&self) -> Value {
        let columns: Map<String, Value> = self
            .columns
            .iter()
            .map(|c| {
                (
                    c.name.clone(),
                    json!({"name": c.name, "description": c.description, "meta": {}, "tags": []}),
                )
            })
            .collect();

        json!({
            "resource_type": self.resource_type,
            "unique_id": self.unique_id(),
            "package_name": self.package,
            "name": self.name,
            "alias": self.name,
            "schema": self.schema,
            "database": self.database,
            "description": self.description,
            "raw_sql": format!("select * from {{{{ ref('stg_{}') }}}}", self.name),
            "columns": columns,
            "config": {"materialized": "table", "owner": self.owner},
            "original_file_path": format!("models/{}.sql", self.name),
            "tags": []
        })
    }

    fn catalog_node(&self) -> Value {
        let columns: Map<String, Value> = self
            .columns
            .iter()
            .filter(|c| c.materialized)
            .map(|c| {
                (
                    c.name.to_uppercase(),
                    json!({"type": c.col_type, "index": c.index, "name": c.name.to_uppercase()}),
                )
            })
            .collect();

        json!({
            "unique_id": self.unique_id(),
            "metadata": {
                "type": self.relation_type,
                "schema": self.schema,
                "name": self.name.to_uppercase(),
                "database": self.database
            },
            "columns": columns,
            "stats": {}
        })
    }
}

/// A whole dbt project.
#[derive(Debug, Clone, Default)]
pub struct ProjectFixture {
    pub models: Vec<ModelFixture>,
}

impl ProjectFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: ModelFixture) -> Self {
        self.models.push(model);
        self
    }

    pub fn manifest(&self) -> Value {
        let nodes: Map<String, Value> = self
            .models
            .iter()
            .map(|m| (m.unique_id(), m.manifest_node()))
            .collect();

        json!({
            "metadata": {"dbt_schema_version": "https://schemas.getdbt.com/dbt/manifest/v4.json"},
            "nodes": nodes,
            "sources": {},
            "macros": {}
        })
    }

    pub fn catalog(&self) -> Value {
        let nodes: Map<String, Value> = self
            .models
            .iter()
            .filter(|m| m.in_catalog)
            .map(|m| (m.unique_id(), m.catalog_node()))
            .collect();

        json!({
            "metadata": {"dbt_schema_version": "https://schemas.getdbt.com/dbt/catalog/v1.json"},
            "nodes": nodes,
            "sources": {},
            "errors": null
        })
    }
}

/// The `public.users` model with an id and email column.
pub fn users_model() -> ModelFixture {
    ModelFixture::new("public", "users")
        .with_database("DB")
        .with_column(ColumnFixture::new("id", "NUMBER", 1).with_description("Primary key"))
        .with_column(ColumnFixture::new("email", "TEXT", 2))
}
