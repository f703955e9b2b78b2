use std::sync::Arc;

use relmap_core::sql_ast::{
    CorrelatedPluralTableGroup, NavigablePath, SqlAliasBaseManager, StandardTableGroup,
    TableGroupJoin, TableGroupRef,
};
use relmap_core::types::{TypeConfiguration, TypeConfigurationBuilder};
use relmap_core::TypeSettings;

/// Unfrozen configuration with only the standard types
#[allow(dead_code)]
pub fn config() -> Arc<TypeConfiguration> {
    Arc::new(
        TypeConfigurationBuilder::new()
            .build()
            .expect("standard configuration builds"),
    )
}

/// Configuration bootstrapped from settings TOML
#[allow(dead_code)]
pub fn config_from_toml(toml: &str) -> Arc<TypeConfiguration> {
    let settings = TypeSettings::from_toml_str(toml).expect("settings parse");
    TypeConfiguration::bootstrap(&settings).expect("bootstrap succeeds")
}

/// `Person` owning a `phones` map: the outer group plus index and element joins
#[allow(dead_code)]
pub struct PluralFixture {
    pub outer_path: NavigablePath,
    pub plural_path: NavigablePath,
    pub group: CorrelatedPluralTableGroup,
    pub index_join: TableGroupJoin,
    pub element_join: TableGroupJoin,
}

#[allow(dead_code)]
pub fn plural_fixture() -> PluralFixture {
    let aliases = SqlAliasBaseManager::new();
    let outer_path = NavigablePath::root("Person");
    let plural_path = outer_path.append("phones");

    let outer: TableGroupRef = Arc::new(
        StandardTableGroup::new(
            outer_path.clone(),
            "person",
            aliases.create_sql_alias_base("Person"),
        )
        .with_fk_target("company"),
    );
    let index: TableGroupRef = Arc::new(StandardTableGroup::new(
        plural_path.append_index(),
        "phone_kind",
        aliases.create_sql_alias_base("kind"),
    ));
    let element: TableGroupRef = Arc::new(StandardTableGroup::new(
        plural_path.append_element(),
        "phone",
        aliases.create_sql_alias_base("element"),
    ));

    PluralFixture {
        outer_path,
        plural_path,
        group: CorrelatedPluralTableGroup::new(outer, aliases.create_sql_alias_base("Person")),
        index_join: TableGroupJoin::inner(index, None),
        element_join: TableGroupJoin::inner(element, None),
    }
}

/// A join for a fresh group at `path`, for double-registration attempts
#[allow(dead_code)]
pub fn stray_join(path: NavigablePath, table: &str) -> TableGroupJoin {
    let aliases = SqlAliasBaseManager::new();
    let group: TableGroupRef = Arc::new(StandardTableGroup::new(
        path,
        table,
        aliases.create_sql_alias_base(table),
    ));
    TableGroupJoin::inner(group, None)
}
