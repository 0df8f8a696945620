//! RIS tags and the canonical fields they normalise to.
//!
//! See: http://en.wikipedia.org/wiki/RIS_(file_format)

use crate::record::field;

/// RIS tags the reader understands.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub(crate) enum RisTag {
    /// TY - Type of reference
    Type,
    /// TI - Primary title
    Title,
    /// T1 - Primary title (alternative)
    TitleAlternative,
    /// AU - Author
    Author,
    /// A1 - Primary author
    AuthorPrimary,
    /// T2 - Secondary title (journal or book title)
    SecondaryTitle,
    /// JF - Journal/Periodical name: full format
    JournalFull,
    /// JO - Journal/Periodical name: full format (alternative)
    JournalFullAlternative,
    /// PY - Publication year
    PublicationYear,
    /// Y1 - Primary date
    DatePrimary,
    /// DA - Date
    Date,
    /// VL - Volume number
    Volume,
    /// IS - Issue number
    Issue,
    /// SP - Start page
    StartPage,
    /// EP - End page
    EndPage,
    /// DO - DOI
    Doi,
    /// SN - ISSN/ISBN
    SerialNumber,
    /// PB - Publisher
    Publisher,
    /// CY - Place published
    PlacePublished,
    /// ET - Edition
    Edition,
    /// CN - Call number
    CallNumber,
    /// ER - End of reference
    EndOfReference,
    /// Any other tag, kept under its own name
    Unknown(String),
}

impl RisTag {
    pub(crate) fn from_tag(tag: &str) -> Self {
        match tag {
            "TY" => RisTag::Type,
            "TI" => RisTag::Title,
            "T1" => RisTag::TitleAlternative,
            "AU" => RisTag::Author,
            "A1" => RisTag::AuthorPrimary,
            "T2" => RisTag::SecondaryTitle,
            "JF" => RisTag::JournalFull,
            "JO" => RisTag::JournalFullAlternative,
            "PY" => RisTag::PublicationYear,
            "Y1" => RisTag::DatePrimary,
            "DA" => RisTag::Date,
            "VL" => RisTag::Volume,
            "IS" => RisTag::Issue,
            "SP" => RisTag::StartPage,
            "EP" => RisTag::EndPage,
            "DO" => RisTag::Doi,
            "SN" => RisTag::SerialNumber,
            "PB" => RisTag::Publisher,
            "CY" => RisTag::PlacePublished,
            "ET" => RisTag::Edition,
            "CN" => RisTag::CallNumber,
            "ER" => RisTag::EndOfReference,
            _ => RisTag::Unknown(tag.to_string()),
        }
    }

    pub(crate) fn as_tag(&self) -> &str {
        match self {
            RisTag::Type => "TY",
            RisTag::Title => "TI",
            RisTag::TitleAlternative => "T1",
            RisTag::Author => "AU",
            RisTag::AuthorPrimary => "A1",
            RisTag::SecondaryTitle => "T2",
            RisTag::JournalFull => "JF",
            RisTag::JournalFullAlternative => "JO",
            RisTag::PublicationYear => "PY",
            RisTag::DatePrimary => "Y1",
            RisTag::Date => "DA",
            RisTag::Volume => "VL",
            RisTag::Issue => "IS",
            RisTag::StartPage => "SP",
            RisTag::EndPage => "EP",
            RisTag::Doi => "DO",
            RisTag::SerialNumber => "SN",
            RisTag::Publisher => "PB",
            RisTag::PlacePublished => "CY",
            RisTag::Edition => "ET",
            RisTag::CallNumber => "CN",
            RisTag::EndOfReference => "ER",
            RisTag::Unknown(tag) => tag,
        }
    }

    /// Canonical field this tag fills, if it maps onto one.
    ///
    /// Page tags are combined separately and unknown tags keep their own name.
    pub(crate) fn canonical_field(&self) -> Option<&'static str> {
        match self {
            RisTag::Title | RisTag::TitleAlternative => Some(field::TITLE),
            RisTag::Author | RisTag::AuthorPrimary => Some(field::AUTHOR),
            RisTag::SecondaryTitle | RisTag::JournalFull | RisTag::JournalFullAlternative => {
                Some(field::PUBLICATION_TITLE)
            }
            RisTag::PublicationYear | RisTag::DatePrimary | RisTag::Date => {
                Some(field::PUBLICATION_YEAR)
            }
            RisTag::Volume => Some(field::VOLUME),
            RisTag::Issue => Some(field::ISSUE),
            RisTag::Doi => Some(field::DOI),
            RisTag::SerialNumber => Some(field::ISSN),
            RisTag::Publisher => Some(field::PUBLISHER),
            RisTag::PlacePublished => Some(field::PLACE),
            RisTag::Edition => Some(field::EDITION),
            RisTag::CallNumber => Some(field::CALL_NUMBER),
            RisTag::Type
            | RisTag::StartPage
            | RisTag::EndPage
            | RisTag::EndOfReference
            | RisTag::Unknown(_) => None,
        }
    }

    /// Whether repeated values join into one field instead of first-wins.
    pub(crate) fn accumulates(&self) -> bool {
        matches!(
            self,
            RisTag::Author | RisTag::AuthorPrimary | RisTag::SerialNumber | RisTag::Unknown(_)
        )
    }

    pub(crate) fn is_date_tag(&self) -> bool {
        matches!(
            self,
            RisTag::PublicationYear | RisTag::DatePrimary | RisTag::Date
        )
    }
}
