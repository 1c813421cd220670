// src/services/case_rules.rs
//
// Regras puras do domínio: permissões de transição de status, efeitos
// colaterais da transição (carimbo/limpeza de datas de conclusão) e a
// classificação de urgência por prazo ("bucket").
//
// Nenhuma função aqui lê o relógio: `now`/`today` chegam como argumento,
// e quem injeta o horário real são os serviços.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    common::error::AppError,
    models::{
        cases::{Bucket, Case, CaseStatus, UpdateCasePayload},
        users::{CaseFieldOverrides, Role, TransitionOverrides, User},
    },
};

// Para quais status o usuário pode mover um processo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPermissions {
    pub novo: bool,
    pub andamento: bool,
    pub pendente: bool,
    pub concluido: bool,
}

impl TransitionPermissions {
    // Padrão por papel:
    // - admin pode tudo;
    // - editor pode mover para andamento e concluído;
    // - viewer (e qualquer outro) só pode concluir.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self { novo: true, andamento: true, pendente: true, concluido: true },
            Role::Editor => Self { novo: false, andamento: true, pendente: false, concluido: true },
            Role::Viewer => Self { novo: false, andamento: false, pendente: false, concluido: true },
        }
    }

    // Cada flag presente no override substitui o padrão do papel.
    pub fn apply_overrides(mut self, overrides: &TransitionOverrides) -> Self {
        if let Some(v) = overrides.novo {
            self.novo = v;
        }
        if let Some(v) = overrides.andamento {
            self.andamento = v;
        }
        if let Some(v) = overrides.pendente {
            self.pendente = v;
        }
        if let Some(v) = overrides.concluido {
            self.concluido = v;
        }
        self
    }

    pub fn allows(&self, target: CaseStatus) -> bool {
        match target {
            CaseStatus::Novo => self.novo,
            CaseStatus::Andamento => self.andamento,
            CaseStatus::Pendente => self.pendente,
            CaseStatus::Concluido => self.concluido,
        }
    }
}

// Permissões efetivas de um usuário: padrão do papel + overrides do JSONB.
pub fn permissions_for(user: &User) -> TransitionPermissions {
    let base = TransitionPermissions::for_role(user.role);
    match &user.permissions.transitions {
        Some(overrides) => base.apply_overrides(overrides),
        None => base,
    }
}

// Quais campos de um processo o usuário pode alterar no PATCH parcial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseFieldPermissions {
    pub client_name: bool,
    pub process_number: bool,
    pub description: bool,
    pub start_date: bool,
    pub due_date: bool,
    pub assigned_to: bool,
}

impl CaseFieldPermissions {
    // Padrão por papel:
    // - admin edita tudo;
    // - editor não mexe nos campos de registro (número do processo e
    //   data de início), só nos operacionais;
    // - viewer não edita nada (o guard de escrita já barra antes).
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                client_name: true,
                process_number: true,
                description: true,
                start_date: true,
                due_date: true,
                assigned_to: true,
            },
            Role::Editor => Self {
                client_name: true,
                process_number: false,
                description: true,
                start_date: false,
                due_date: true,
                assigned_to: true,
            },
            Role::Viewer => Self {
                client_name: false,
                process_number: false,
                description: false,
                start_date: false,
                due_date: false,
                assigned_to: false,
            },
        }
    }

    pub fn apply_overrides(mut self, overrides: &CaseFieldOverrides) -> Self {
        if let Some(v) = overrides.client_name {
            self.client_name = v;
        }
        if let Some(v) = overrides.process_number {
            self.process_number = v;
        }
        if let Some(v) = overrides.description {
            self.description = v;
        }
        if let Some(v) = overrides.start_date {
            self.start_date = v;
        }
        if let Some(v) = overrides.due_date {
            self.due_date = v;
        }
        if let Some(v) = overrides.assigned_to {
            self.assigned_to = v;
        }
        self
    }
}

// Direitos de edição efetivos: padrão do papel + overrides do JSONB.
pub fn field_permissions_for(user: &User) -> CaseFieldPermissions {
    let base = CaseFieldPermissions::for_role(user.role);
    match &user.permissions.case_fields {
        Some(overrides) => base.apply_overrides(overrides),
        None => base,
    }
}

// Rejeita o PATCH se o payload tocar algum campo vetado para o perfil.
// Campos ausentes do payload não contam como edição.
pub fn check_field_edits(
    payload: &UpdateCasePayload,
    perms: &CaseFieldPermissions,
) -> Result<(), AppError> {
    if payload.client_name.is_some() && !perms.client_name {
        return Err(AppError::FieldNotEditable { field: "clientName" });
    }
    if payload.process_number.is_some() && !perms.process_number {
        return Err(AppError::FieldNotEditable { field: "processNumber" });
    }
    if payload.description.is_some() && !perms.description {
        return Err(AppError::FieldNotEditable { field: "description" });
    }
    if payload.start_date.is_some() && !perms.start_date {
        return Err(AppError::FieldNotEditable { field: "startDate" });
    }
    if payload.due_date.is_some() && !perms.due_date {
        return Err(AppError::FieldNotEditable { field: "dueDate" });
    }
    if payload.assigned_to.is_some() && !perms.assigned_to {
        return Err(AppError::FieldNotEditable { field: "assignedTo" });
    }
    Ok(())
}

// Datas de conclusão resultantes de uma transição aceita.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEffect {
    pub completed_date: Option<DateTime<Utc>>,
    pub data_entrega: Option<DateTime<Utc>>,
}

// Valida a transição e calcula o efeito sobre as datas de conclusão.
//
// Invariante mantido: completed_date/data_entrega preenchidos se e somente
// se o status resultante for `concluido`.
// - entrar em concluído carimba as duas datas com `now`;
// - reaplicar concluído preserva as datas originais (idempotente);
// - sair de concluído (ou qualquer status não-concluído) limpa as duas.
pub fn apply_transition(
    case: &Case,
    target: CaseStatus,
    perms: &TransitionPermissions,
    now: DateTime<Utc>,
) -> Result<TransitionEffect, AppError> {
    if !perms.allows(target) {
        return Err(AppError::TransitionNotAllowed { from: case.status, to: target });
    }

    let effect = match target {
        CaseStatus::Concluido if case.status == CaseStatus::Concluido => TransitionEffect {
            completed_date: case.completed_date,
            data_entrega: case.data_entrega,
        },
        CaseStatus::Concluido => TransitionEffect {
            completed_date: Some(now),
            data_entrega: Some(now),
        },
        _ => TransitionEffect { completed_date: None, data_entrega: None },
    };

    Ok(effect)
}

// Classifica o processo no bucket de urgência. Recalculado a cada
// requisição: "hoje" muda o resultado.
pub fn bucket_for(status: CaseStatus, due_date: Option<NaiveDate>, today: NaiveDate) -> Bucket {
    if status == CaseStatus::Concluido {
        return Bucket::Concluido;
    }
    if let Some(due) = due_date {
        if due < today {
            return Bucket::Atrasado;
        }
    }
    if status == CaseStatus::Novo {
        return Bucket::Novo;
    }
    Bucket::Pendente
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sqlx::types::Json;
    use uuid::Uuid;

    use crate::models::users::UserPermissions;

    fn hoje() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn agora() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap()
    }

    fn caso(status: CaseStatus) -> Case {
        Case {
            id: Uuid::new_v4(),
            client_name: "Maria da Silva".into(),
            process_number: "0001234-56.2024.8.26.0100".into(),
            description: None,
            status,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            due_date: None,
            completed_date: None,
            data_entrega: None,
            assigned_to: None,
            created_by: None,
            created_at: agora(),
            updated_at: agora(),
        }
    }

    fn usuario(role: Role, permissions: UserPermissions) -> User {
        User {
            id: Uuid::new_v4(),
            username: "teste".into(),
            email: "teste@escritorio.com.br".into(),
            password_hash: "hash".into(),
            role,
            permissions: Json(permissions),
            created_at: agora(),
            updated_at: agora(),
        }
    }

    // --- bucket_for ---

    #[test]
    fn bucket_concluido_ignora_prazo() {
        let passado = Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(bucket_for(CaseStatus::Concluido, passado, hoje()), Bucket::Concluido);
        assert_eq!(bucket_for(CaseStatus::Concluido, None, hoje()), Bucket::Concluido);
    }

    #[test]
    fn bucket_prazo_vencido_vira_atrasado() {
        let ontem = Some(hoje().pred_opt().unwrap());
        assert_eq!(bucket_for(CaseStatus::Pendente, ontem, hoje()), Bucket::Atrasado);
        assert_eq!(bucket_for(CaseStatus::Novo, ontem, hoje()), Bucket::Atrasado);
        assert_eq!(bucket_for(CaseStatus::Andamento, ontem, hoje()), Bucket::Atrasado);
    }

    #[test]
    fn bucket_vencimento_hoje_nao_e_atrasado() {
        // "estritamente antes de hoje": vencer hoje ainda não é atraso
        assert_eq!(bucket_for(CaseStatus::Pendente, Some(hoje()), hoje()), Bucket::Pendente);
    }

    #[test]
    fn bucket_novo_sem_atraso() {
        let futuro = Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(bucket_for(CaseStatus::Novo, futuro, hoje()), Bucket::Novo);
        assert_eq!(bucket_for(CaseStatus::Novo, None, hoje()), Bucket::Novo);
    }

    #[test]
    fn bucket_pendente_sem_prazo_cai_no_fallback() {
        assert_eq!(bucket_for(CaseStatus::Pendente, None, hoje()), Bucket::Pendente);
        assert_eq!(bucket_for(CaseStatus::Andamento, None, hoje()), Bucket::Pendente);
    }

    // --- permissões ---

    #[test]
    fn admin_pode_todas_as_transicoes() {
        let perms = TransitionPermissions::for_role(Role::Admin);
        for alvo in [
            CaseStatus::Novo,
            CaseStatus::Andamento,
            CaseStatus::Pendente,
            CaseStatus::Concluido,
        ] {
            assert!(perms.allows(alvo), "admin deveria poder mover para {alvo:?}");
        }
    }

    #[test]
    fn editor_so_andamento_e_concluido() {
        let perms = TransitionPermissions::for_role(Role::Editor);
        assert!(perms.allows(CaseStatus::Andamento));
        assert!(perms.allows(CaseStatus::Concluido));
        assert!(!perms.allows(CaseStatus::Novo));
        assert!(!perms.allows(CaseStatus::Pendente));
    }

    #[test]
    fn viewer_so_pode_concluir() {
        let perms = TransitionPermissions::for_role(Role::Viewer);
        assert!(perms.allows(CaseStatus::Concluido));
        assert!(!perms.allows(CaseStatus::Novo));
        assert!(!perms.allows(CaseStatus::Andamento));
        assert!(!perms.allows(CaseStatus::Pendente));
    }

    #[test]
    fn override_individual_substitui_padrao_do_papel() {
        // Editor sob medida: reabre para andamento e conclui, mas não
        // marca novo nem pendente.
        let user = usuario(
            Role::Editor,
            UserPermissions {
                transitions: Some(TransitionOverrides {
                    novo: Some(false),
                    andamento: Some(true),
                    pendente: Some(false),
                    concluido: Some(true),
                }),
                case_fields: None,
                pages: None,
            },
        );
        let perms = permissions_for(&user);
        assert!(perms.allows(CaseStatus::Andamento));
        assert!(perms.allows(CaseStatus::Concluido));
        assert!(!perms.allows(CaseStatus::Novo));
        assert!(!perms.allows(CaseStatus::Pendente));
    }

    #[test]
    fn override_pode_ampliar_viewer() {
        let user = usuario(
            Role::Viewer,
            UserPermissions {
                transitions: Some(TransitionOverrides {
                    andamento: Some(true),
                    ..Default::default()
                }),
                case_fields: None,
                pages: None,
            },
        );
        let perms = permissions_for(&user);
        assert!(perms.allows(CaseStatus::Andamento));
        // as flags não mencionadas seguem o padrão do papel
        assert!(!perms.allows(CaseStatus::Novo));
        assert!(perms.allows(CaseStatus::Concluido));
    }

    // --- edição campo a campo ---

    #[test]
    fn editor_nao_altera_campos_de_registro() {
        let perms = CaseFieldPermissions::for_role(Role::Editor);
        let payload = UpdateCasePayload {
            client_name: None,
            process_number: Some("0009999-00.2024.8.26.0100".into()),
            description: None,
            start_date: None,
            due_date: None,
            assigned_to: None,
        };
        let err = check_field_edits(&payload, &perms).unwrap_err();
        match err {
            AppError::FieldNotEditable { field } => assert_eq!(field, "processNumber"),
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn editor_altera_campos_operacionais() {
        let perms = CaseFieldPermissions::for_role(Role::Editor);
        let payload = UpdateCasePayload {
            client_name: Some("Maria de Souza".into()),
            process_number: None,
            description: Some("Audiência remarcada".into()),
            start_date: None,
            due_date: Some(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()),
            assigned_to: None,
        };
        assert!(check_field_edits(&payload, &perms).is_ok());
    }

    #[test]
    fn admin_altera_qualquer_campo() {
        let perms = CaseFieldPermissions::for_role(Role::Admin);
        let payload = UpdateCasePayload {
            client_name: Some("Maria de Souza".into()),
            process_number: Some("0009999-00.2024.8.26.0100".into()),
            description: None,
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
            due_date: None,
            assigned_to: Some(Uuid::new_v4()),
        };
        assert!(check_field_edits(&payload, &perms).is_ok());
    }

    #[test]
    fn override_libera_campo_vetado_para_editor() {
        let user = usuario(
            Role::Editor,
            UserPermissions {
                transitions: None,
                case_fields: Some(CaseFieldOverrides {
                    process_number: Some(true),
                    ..Default::default()
                }),
                pages: None,
            },
        );
        let perms = field_permissions_for(&user);
        assert!(perms.process_number);
        // os demais seguem o padrão do papel
        assert!(!perms.start_date);
        assert!(perms.due_date);
    }

    #[test]
    fn payload_vazio_nunca_e_rejeitado() {
        let perms = CaseFieldPermissions::for_role(Role::Viewer);
        let payload = UpdateCasePayload {
            client_name: None,
            process_number: None,
            description: None,
            start_date: None,
            due_date: None,
            assigned_to: None,
        };
        assert!(check_field_edits(&payload, &perms).is_ok());
    }

    // --- apply_transition ---

    #[test]
    fn admin_conclui_e_carimba_datas() {
        let c = caso(CaseStatus::Novo);
        let perms = TransitionPermissions::for_role(Role::Admin);
        let efeito = apply_transition(&c, CaseStatus::Concluido, &perms, agora()).unwrap();
        assert_eq!(efeito.completed_date, Some(agora()));
        assert_eq!(efeito.data_entrega, Some(agora()));
    }

    #[test]
    fn viewer_nao_move_para_novo() {
        let c = caso(CaseStatus::Pendente);
        let perms = TransitionPermissions::for_role(Role::Viewer);
        let err = apply_transition(&c, CaseStatus::Novo, &perms, agora()).unwrap_err();
        match err {
            AppError::TransitionNotAllowed { from, to } => {
                assert_eq!(from, CaseStatus::Pendente);
                assert_eq!(to, CaseStatus::Novo);
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn reaplicar_concluido_preserva_datas() {
        let primeira_vez = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let mut c = caso(CaseStatus::Concluido);
        c.completed_date = Some(primeira_vez);
        c.data_entrega = Some(primeira_vez);

        let perms = TransitionPermissions::for_role(Role::Admin);
        let efeito = apply_transition(&c, CaseStatus::Concluido, &perms, agora()).unwrap();
        assert_eq!(efeito.completed_date, Some(primeira_vez));
        assert_eq!(efeito.data_entrega, Some(primeira_vez));
    }

    #[test]
    fn sair_de_concluido_limpa_datas() {
        let mut c = caso(CaseStatus::Concluido);
        c.completed_date = Some(agora());
        c.data_entrega = Some(agora());

        let perms = TransitionPermissions::for_role(Role::Admin);
        for alvo in [CaseStatus::Novo, CaseStatus::Andamento, CaseStatus::Pendente] {
            let efeito = apply_transition(&c, alvo, &perms, agora()).unwrap();
            assert_eq!(efeito.completed_date, None, "sair para {alvo:?}");
            assert_eq!(efeito.data_entrega, None, "sair para {alvo:?}");
        }
    }

    #[test]
    fn transicao_entre_abertos_nao_carimba_nada() {
        let c = caso(CaseStatus::Novo);
        let perms = TransitionPermissions::for_role(Role::Admin);
        let efeito = apply_transition(&c, CaseStatus::Andamento, &perms, agora()).unwrap();
        assert_eq!(efeito.completed_date, None);
        assert_eq!(efeito.data_entrega, None);
    }
}
