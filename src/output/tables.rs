//! Conversion of a [`StatsReport`] into flat tables.

use super::Table;
use crate::stats::StatsReport;

pub const PARTICIPANTS_TABLE: &str = "stats_usuarios";
pub const MONTHS_TABLE: &str = "mensajes_por_mes";
pub const HOURS_TABLE: &str = "mensajes_por_hora";
pub const WEEKDAYS_TABLE: &str = "mensajes_por_dia_semana";
pub const MENTION_RANKING_TABLE: &str = "menciones_globales";
pub const MENTION_EDGES_TABLE: &str = "menciones_por_autor";

/// Columns of the normalized records CSV.
pub const RECORD_COLUMNS: [&str; 3] = ["fecha", "nombre", "mensaje"];

impl StatsReport {
    /// All six tables, in a fixed order.
    pub fn tables(&self) -> Vec<Table> {
        vec![
            self.participants_table(),
            self.months_table(),
            self.hours_table(),
            self.weekdays_table(),
            self.mention_ranking_table(),
            self.mention_edges_table(),
        ]
    }

    /// One row per participant, in order of first message.
    pub fn participants_table(&self) -> Table {
        let mut table = Table::new(
            PARTICIPANTS_TABLE,
            vec![
                "nombre",
                "num_mensajes",
                "num_palabras",
                "media_longitud_mensaje",
                "hora_favorita",
                "num_emojis",
                "num_multimedia",
                "num_enlaces",
                "num_preguntas",
                "palabras_mas_usadas",
                "menciones_hechas",
            ],
        );
        for p in &self.participants {
            table.push_row(vec![
                p.name.clone(),
                p.message_count.to_string(),
                p.word_count.to_string(),
                format!("{:.2}", p.average_length),
                p.favorite_hour.map(|h| h.to_string()).unwrap_or_default(),
                p.emoji_count.to_string(),
                p.media_count.to_string(),
                p.link_count.to_string(),
                p.question_count.to_string(),
                p.top_words_summary(),
                p.top_mentions_summary(),
            ]);
        }
        table
    }

    pub fn months_table(&self) -> Table {
        let mut table = Table::new(MONTHS_TABLE, vec!["año", "mes", "usuario", "num_mensajes"]);
        for m in &self.months {
            table.push_row(vec![
                m.year.to_string(),
                m.month.to_string(),
                m.participant.clone(),
                m.count.to_string(),
            ]);
        }
        table
    }

    pub fn hours_table(&self) -> Table {
        let mut table = Table::new(HOURS_TABLE, vec!["hora", "usuario", "num_mensajes"]);
        for h in &self.hours {
            table.push_row(vec![
                h.hour.to_string(),
                h.participant.clone(),
                h.count.to_string(),
            ]);
        }
        table
    }

    pub fn weekdays_table(&self) -> Table {
        let mut table = Table::new(
            WEEKDAYS_TABLE,
            vec!["dia_semana_num", "dia_semana", "usuario", "num_mensajes"],
        );
        for w in &self.weekdays {
            table.push_row(vec![
                w.weekday.to_string(),
                w.weekday_name().to_string(),
                w.participant.clone(),
                w.count.to_string(),
            ]);
        }
        table
    }

    /// Top mentioned identities; empty when nobody was mentioned.
    pub fn mention_ranking_table(&self) -> Table {
        let mut table = Table::new(MENTION_RANKING_TABLE, vec!["usuario_mencionado", "conteo"]);
        for ranked in &self.mentions.top {
            table.push_row(vec![ranked.item.clone(), ranked.count.to_string()]);
        }
        table
    }

    pub fn mention_edges_table(&self) -> Table {
        let mut table = Table::new(
            MENTION_EDGES_TABLE,
            vec!["autor_mencionador", "usuario_mencionado", "conteo"],
        );
        for edge in &self.mentions.edges {
            table.push_row(vec![
                edge.mentioner.clone(),
                edge.mentioned.clone(),
                edge.count.to_string(),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use crate::config::AnalysisConfig;
    use crate::parser::TranscriptParser;
    use crate::stats::{StatsAggregator, StatsReport};

    fn report() -> StatsReport {
        let config = AnalysisConfig::default();
        let records = TranscriptParser::new(&config).parse_lines([
            "01/01/24, 10:00 - Ana: hola Pablo, pizza?",
            "01/01/24, 10:01 - Pablo: pizza pizza",
        ]);
        StatsAggregator::new(&config).analyze(&records)
    }

    #[test]
    fn test_tables_order_and_names() {
        let names: Vec<&str> = report().tables().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            [
                "stats_usuarios",
                "mensajes_por_mes",
                "mensajes_por_hora",
                "mensajes_por_dia_semana",
                "menciones_globales",
                "menciones_por_autor",
            ]
        );
    }

    #[test]
    fn test_participants_table_row() {
        let table = report().participants_table();
        assert_eq!(table.headers.len(), 11);
        assert_eq!(
            table.rows[0],
            [
                "Ana",
                "1",
                "3",
                "18.00",
                "10",
                "0",
                "0",
                "0",
                "1",
                "pablo (1), pizza (1)",
                "Pablo (1)",
            ]
        );
        assert_eq!(table.rows[1][9], "pizza (2)");
        assert_eq!(table.rows[1][10], "");
    }

    #[test]
    fn test_every_row_matches_header_width() {
        for table in report().tables() {
            for row in &table.rows {
                assert_eq!(row.len(), table.headers.len(), "{}", table.name);
            }
        }
    }

    #[test]
    fn test_empty_report_tables_have_no_rows() {
        for table in StatsReport::default().tables() {
            assert!(table.is_empty(), "{}", table.name);
        }
    }
}
