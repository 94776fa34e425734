//! SPARQL query templates for the Wikidata endpoint.
//!
//! The subject is substituted verbatim between double quotes. It is not
//! escaped: a subject containing `"` produces a malformed query, which the
//! endpoint rejects.

/// Selects a politician's birth date and, if present, death date.
///
/// Matches humans (`wd:Q5`) whose occupation is politician (`wd:Q82955`)
/// and who carry any English label equal to `person`.
#[must_use]
pub fn person_query(person: &str) -> String {
    format!(
        r#"SELECT DISTINCT ?person ?personLabel ?date_of_birth ?date_of_death WHERE {{
    ?person wdt:P31 wd:Q5;
    wdt:P106 wd:Q82955;
    wdt:P569 ?date_of_birth;
    ?label "{person}"@en.
    OPTIONAL {{ ?person wdt:P570 ?date_of_death. }}
    SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}}"#
    )
}

/// Selects a capital city and, if present, its population.
#[must_use]
pub fn city_query(city: &str) -> String {
    format!(
        r#"SELECT DISTINCT ?city ?cityLabel ?population WHERE {{
    ?city wdt:P31 wd:Q5119;
    ?label "{city}"@en.
    OPTIONAL {{ ?city wdt:P1082 ?population. }}
    SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}}"#
    )
}
