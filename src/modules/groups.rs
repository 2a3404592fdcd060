use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::base::client::AurionClient;
use crate::utils::constants::Field;
use crate::utils::xml::Element;
use crate::Error;

/// A decoded `YEAR_LEVEL_NAME_CODE_GROUP` group code
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct Membership {
    pub year: String,
    pub level: String,
    /// Third and fourth tokens of the group code
    pub code: [String; 2],
    /// Last token of the group code
    pub group: String,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub enum GroupCode {
    /// `YEAR_LEVEL_NAME_CODE_GROUP` (at least 4 tokens)
    Membership(Membership),
    /// `YEAR_LEVEL_MAJOR` (exactly 3 tokens)
    Major { year: String, level: String, major: String },
    /// Any other shape, the [String] contains the raw code
    Unrecognized(String),
}

impl GroupCode {
    pub fn parse(payload: &str) -> Self {
        let parts = payload.split('_').collect::<Vec<&str>>();
        match parts.as_slice() {
            [year, level, major] => GroupCode::Major {
                year: year.to_string(),
                level: level.to_string(),
                major: major.to_string(),
            },
            [year, level, name, code, ..] => GroupCode::Membership(Membership {
                year: year.to_string(),
                level: level.to_string(),
                code: [name.to_string(), code.to_string()],
                group: parts[parts.len() - 1].to_string(),
            }),
            _ => GroupCode::Unrecognized(payload.to_string()),
        }
    }
}

/// One row of the users groups favorite
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct UserGroup {
    pub login: String,
    pub email: Option<String>,
    pub code: GroupCode,
    /// The group code as sent by Aurion
    pub raw: String,
}

impl UserGroup {
    pub fn from_row(row: &Element) -> Result<Self, Error> {
        let login = row.field(Field::USER_LOGIN)?.trim().to_string();
        let email = row
            .optional_field(Field::USER_EMAIL)
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(String::from);
        let raw = row.field(Field::GROUP_CODE)?.trim().to_string();

        Ok(Self { login, email, code: GroupCode::parse(&raw), raw })
    }

    /// The decoded membership, [None] for majors and unrecognized codes
    pub fn membership(&self) -> Option<&Membership> {
        match &self.code {
            GroupCode::Membership(membership) => Some(membership),
            _ => None,
        }
    }
}

/// Reads every row of a response, in document order
pub fn parse_users_groups(root: &Element) -> Result<Vec<UserGroup>, Error> {
    let groups = root.rows().into_iter().map(UserGroup::from_row).collect::<Result<Vec<_>, _>>()?;
    for group in &groups {
        if let GroupCode::Unrecognized(raw) = &group.code {
            warn!("Unrecognized group code '{raw}' for '{}'", group.login);
        }
    }
    Ok(groups)
}

impl AurionClient {
    /// Gets the groups every user belongs to. <br>
    /// Rows are returned whatever the shape of their group code, use [UserGroup::membership] to
    /// keep only the decoded memberships
    pub async fn get_users_groups(&self) -> Result<Vec<UserGroup>, Error> {
        let root = self.send_request(self.favorites().users_groups).await?;
        let groups = parse_users_groups(&root)?;
        debug!("Got {} users groups from Aurion", groups.len());
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::xml::parse_document;
    use pretty_assertions::assert_eq;

    fn strings<const N: usize>(values: [&str; N]) -> [String; N] {
        values.map(String::from)
    }

    #[test]
    fn test_parse_membership() {
        let code = GroupCode::parse("2024_L3_INFO_X1_G2");
        assert_eq!(code, GroupCode::Membership(Membership {
            year: String::from("2024"),
            level: String::from("L3"),
            code: strings(["INFO", "X1"]),
            group: String::from("G2"),
        }));
    }

    #[test]
    fn test_parse_four_tokens() {
        match GroupCode::parse("2024_E3_INFO_G1") {
            GroupCode::Membership(membership) => {
                assert_eq!(membership.code, strings(["INFO", "G1"]));
                assert_eq!(membership.group, "G1");
            }
            other => panic!("expected a membership, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_other_shapes() {
        assert_eq!(GroupCode::parse("2024_E3_INFO"), GroupCode::Major {
            year: String::from("2024"),
            level: String::from("E3"),
            major: String::from("INFO"),
        });
        assert_eq!(GroupCode::parse("2024_E3"), GroupCode::Unrecognized(String::from("2024_E3")));
        assert_eq!(GroupCode::parse(""), GroupCode::Unrecognized(String::new()));
    }

    #[test]
    fn test_parse_users_groups() {
        let root = parse_document(
            r#"<result>
                <row>
                    <login.Individu>jdoe</login.Individu>
                    <Coordonnée.Coordonnée>john.doe@example.org</Coordonnée.Coordonnée>
                    <Code.Groupe>2024_L3_INFO_X1_G2</Code.Groupe>
                </row>
                <row>
                    <login.Individu>asmith</login.Individu>
                    <Coordonnée.Coordonnée/>
                    <Code.Groupe>2024_L3_INFO</Code.Groupe>
                </row>
            </result>"#,
        )
        .unwrap();
        let groups = parse_users_groups(&root).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].login, "jdoe");
        assert_eq!(groups[0].email.as_deref(), Some("john.doe@example.org"));
        assert_eq!(groups[0].raw, "2024_L3_INFO_X1_G2");
        assert_eq!(groups[0].membership().map(|m| m.group.as_str()), Some("G2"));
        assert_eq!(groups[1].email, None);
        assert_eq!(groups[1].membership(), None);

        let memberships = groups.iter().filter_map(UserGroup::membership).count();
        assert_eq!(memberships, 1);
    }

    #[test]
    fn test_blank_email_is_none() {
        let root = parse_document(
            "<row><login.Individu> jdoe </login.Individu><Coordonnée.Coordonnée>   </Coordonnée.Coordonnée><Code.Groupe> 2024_L3_INFO_X1_G2\n</Code.Groupe></row>",
        )
        .unwrap();
        let group = UserGroup::from_row(&root).unwrap();

        assert_eq!(group.login, "jdoe");
        assert_eq!(group.email, None);
        assert_eq!(group.raw, "2024_L3_INFO_X1_G2");
        assert_eq!(group.membership().map(|m| m.group.as_str()), Some("G2"));
    }

    #[test]
    fn test_missing_login() {
        let root = parse_document("<result><row><Code.Groupe>2024_L3_INFO_X1_G2</Code.Groupe></row></result>").unwrap();
        assert_eq!(parse_users_groups(&root), Err(Error::MissingField(String::from("login.Individu"))));
    }
}
