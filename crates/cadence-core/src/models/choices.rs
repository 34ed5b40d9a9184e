//! Fixed-choice fields of the marketing form.
//!
//! Each choice serializes as the exact label shown in the form, so stored
//! form memos and plans stay readable, and parses from either that label or a
//! short ASCII slug that is convenient to type on a terminal.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! form_choice {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => ($label:literal, $slug:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Every choice, in form order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name of the form field this choice fills.
            pub const FIELD: &'static str = $field;

            /// Label shown in the form and sent to the model.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// ASCII shorthand accepted on the command line.
            pub fn slug(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|choice| {
                        choice.label() == trimmed || choice.slug().eq_ignore_ascii_case(trimmed)
                    })
                    .ok_or_else(|| format!("Invalid {}: {s}", $field))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

form_choice! {
    /// Creative style of the generated copy and visuals.
    Style, "style" {
        Muji => ("無印風", "muji"),
        Industrial => ("工業風", "industrial"),
        Fashion => ("時尚風", "fashion"),
        #[default]
        Minimal => ("簡約風", "minimal"),
        Cartoon => ("卡通漫畫", "cartoon"),
        Anime => ("日系動漫", "anime"),
        KPop => ("韓系偶像", "kpop"),
    }
}

form_choice! {
    /// Primary audience the calendar speaks to.
    Audience, "audience" {
        Wholesalers => ("B端中盤商", "wholesalers"),
        Retailers => ("B端零售商", "retailers"),
        #[default]
        Consumers => ("C端消費者", "consumers"),
        AspiringFounders => ("準備要創業", "founders"),
        BusinessOwners => ("企業經營者", "owners"),
    }
}

form_choice! {
    /// Strategic goal of the campaign.
    MarketingGoal, "marketingGoal" {
        Authority => ("行業專業權威性", "authority"),
        #[default]
        Inquiries => ("吸引客戶詢問下單", "inquiries"),
        FunKnowledge => ("有趣的專業領域知識", "fun-knowledge"),
        LivelyIntroduction => ("活潑的介紹我的專業", "lively"),
        EverydayKnowledge => ("生活化的介紹專業知識", "everyday"),
        Partnerships => ("產生同業合作機會", "partnerships"),
    }
}

form_choice! {
    /// Which outcome the posts should push hardest.
    StrategyFocus, "strategyFocus" {
        CoreCustomerSales => ("更多主要客戶的銷售", "core-sales"),
        NewCustomers => ("更多陌生客戶的開發", "new-customers"),
        FanEngagement => ("我與粉絲的互動", "engagement"),
        #[default]
        InboundInterest => ("讓有興趣的人來詢問", "inbound"),
    }
}
