//! Document lifecycle: upload, send, threaded comments, validation and
//! archiving, with an append-only history trail.
//!
//! Every action writes a [`DocumentHistory`] row; the trail is never
//! mutated or deleted. Visibility is department-scoped: a document is
//! readable by its creator, anyone whose employee record sits in the
//! source or target department, and the RH_SENIOR/GRH roles.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hr_auth::{capabilities, Action, Principal};
use hr_core::{HrError, HrResult};
use hr_models::{
    Document, DocumentAction, DocumentCategory, DocumentHistory, DocumentStatus, Role,
};
use hr_scope::ScopeResolver;

use crate::entity_id;
use crate::notify::Notifier;
use crate::store::Store;

#[derive(Debug, Clone, Default)]
pub struct UploadDocument {
    pub title: String,
    pub doc_type_id: i64,
    /// Reference into the external file store.
    pub file: String,
    pub source_department_id: Option<i64>,
    pub target_department_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct CommentDocument {
    pub note: String,
    pub parent_id: Option<i64>,
    pub is_private: bool,
}

pub struct DocumentService {
    store: Arc<dyn Store>,
    notifier: Notifier,
}

impl DocumentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let notifier = Notifier::new(store.clone());
        Self { store, notifier }
    }

    /// Create a DRAFT document. EMPLOYEE and CHEF may only upload with
    /// their own department as source; RH_SIMPLE only RH-category types.
    pub async fn upload(
        &self,
        principal: &Principal,
        params: UploadDocument,
        now: DateTime<Utc>,
    ) -> HrResult<Document> {
        capabilities::require(principal, Action::UploadDocument)?;

        if params.title.trim().is_empty() {
            return Err(HrError::validation("title is required"));
        }
        let doc_type = self
            .store
            .doc_type_by_id(params.doc_type_id)
            .await?
            .ok_or_else(|| HrError::validation("document type not found"))?;

        let source_department_id = match principal.role {
            Role::Employee | Role::Chef => {
                let resolver = ScopeResolver::new(self.store.as_ref());
                let employee = resolver
                    .own_employee(principal)
                    .await?
                    .ok_or_else(|| HrError::validation("employee record not found"))?;
                match params.source_department_id {
                    Some(dept) if dept != employee.department_id => {
                        return Err(HrError::forbidden(
                            "documents can only be uploaded for your own department",
                        ));
                    }
                    _ => employee.department_id,
                }
            }
            Role::RhSimple | Role::RhSenior | Role::Grh => params
                .source_department_id
                .ok_or_else(|| HrError::validation("source_department_id is required"))?,
        };

        if principal.role == Role::RhSimple && doc_type.category != DocumentCategory::Rh {
            return Err(HrError::forbidden("only RH documents can be uploaded"));
        }
        if self
            .store
            .department_by_id(source_department_id)
            .await?
            .is_none()
        {
            return Err(HrError::validation("department not found"));
        }

        let document = self
            .store
            .insert_document(Document {
                id: None,
                title: params.title,
                doc_type_id: params.doc_type_id,
                file: params.file,
                source_department_id,
                target_department_id: params.target_department_id,
                created_by: Some(principal.user_id),
                status: DocumentStatus::Draft,
                sent_at: None,
                validated_by: None,
                validated_at: None,
                created_at: Some(now),
            })
            .await?;

        self.append_history(&document, principal, DocumentAction::Created, String::new(), now)
            .await?;
        Ok(document)
    }

    /// DRAFT -> SENT; creator or a chef of the source department. Requires
    /// a target department and notifies its employee-linked users.
    pub async fn send(
        &self,
        principal: &Principal,
        document_id: i64,
        target_department_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> HrResult<Document> {
        let mut document = self.load(document_id).await?;

        if !self.is_creator(principal, &document) && !self.is_source_chef(principal, &document).await? {
            return Err(HrError::forbidden(
                "only the creator or a chef of the source department can send",
            ));
        }
        if !document.status.can_send() {
            return Err(HrError::conflict("document already sent"));
        }

        let target = target_department_id
            .or(document.target_department_id)
            .ok_or_else(|| HrError::validation("target department is required"))?;
        if self.store.department_by_id(target).await?.is_none() {
            return Err(HrError::validation("department not found"));
        }

        document.target_department_id = Some(target);
        document.status = DocumentStatus::Sent;
        document.sent_at = Some(now);
        self.store.update_document(&document).await?;
        self.append_history(&document, principal, DocumentAction::Sent, String::new(), now)
            .await?;

        for employee in self.store.employees_in_department(target).await? {
            if let Some(user) = self.store.user_by_email(&employee.email).await? {
                self.notifier
                    .notify(
                        entity_id(&user, "User")?,
                        "Document received",
                        format!("Document '{}' was sent to your department.", document.title),
                    )
                    .await?;
            }
        }
        Ok(document)
    }

    /// Append a comment, optionally threaded under an earlier comment and
    /// optionally private (visible only to its author, RH_SENIOR and GRH).
    pub async fn comment(
        &self,
        principal: &Principal,
        document_id: i64,
        params: CommentDocument,
        now: DateTime<Utc>,
    ) -> HrResult<DocumentHistory> {
        let document = self.load(document_id).await?;
        if !self.can_access(principal, &document).await? {
            return Err(HrError::forbidden("no access to this document"));
        }
        if params.note.trim().is_empty() {
            return Err(HrError::validation("note is required"));
        }

        if let Some(parent_id) = params.parent_id {
            let parent = self
                .store
                .history_by_id(parent_id)
                .await?
                .filter(|p| p.document_id == document_id && p.action == DocumentAction::Commented)
                .ok_or_else(|| {
                    HrError::validation("parent must be a comment on the same document")
                })?;
            // single-level threading only
            if parent.parent_id.is_some() {
                return Err(HrError::validation("replies cannot be nested further"));
            }
        }

        self.store
            .insert_history(DocumentHistory {
                id: None,
                document_id,
                parent_id: params.parent_id,
                action: DocumentAction::Commented,
                by_user: Some(principal.user_id),
                note: params.note,
                is_private: params.is_private,
                created_at: Some(now),
            })
            .await
    }

    /// Mark VALIDATED; RH_SENIOR/GRH, blocked once validated or archived.
    pub async fn validate(
        &self,
        principal: &Principal,
        document_id: i64,
        now: DateTime<Utc>,
    ) -> HrResult<Document> {
        capabilities::require(principal, Action::ValidateDocument)?;
        let mut document = self.load(document_id).await?;
        if !document.status.can_validate() {
            return Err(HrError::conflict("document cannot be validated"));
        }
        document.status = DocumentStatus::Validated;
        document.validated_by = Some(principal.user_id);
        document.validated_at = Some(now);
        self.store.update_document(&document).await?;
        self.append_history(&document, principal, DocumentAction::Validated, String::new(), now)
            .await?;
        Ok(document)
    }

    /// Mark ARCHIVED; RH_SENIOR/GRH, blocked only when already archived.
    pub async fn archive(
        &self,
        principal: &Principal,
        document_id: i64,
        now: DateTime<Utc>,
    ) -> HrResult<Document> {
        capabilities::require(principal, Action::ArchiveDocument)?;
        let mut document = self.load(document_id).await?;
        if !document.status.can_archive() {
            return Err(HrError::conflict("document already archived"));
        }
        document.status = DocumentStatus::Archived;
        self.store.update_document(&document).await?;
        self.append_history(&document, principal, DocumentAction::Archived, String::new(), now)
            .await?;
        Ok(document)
    }

    /// Role-scoped listing, newest first.
    pub async fn list(&self, principal: &Principal) -> HrResult<Vec<Document>> {
        match principal.role {
            Role::Grh | Role::RhSenior => self.store.documents_all().await,
            Role::RhSimple => {
                let mut own = self.store.documents_created_by(principal.user_id).await?;
                let mut filtered = Vec::with_capacity(own.len());
                for document in own.drain(..) {
                    let rh = self
                        .store
                        .doc_type_by_id(document.doc_type_id)
                        .await?
                        .map(|t| t.category == DocumentCategory::Rh)
                        .unwrap_or(false);
                    if rh {
                        filtered.push(document);
                    }
                }
                Ok(filtered)
            }
            Role::Chef => {
                let resolver = ScopeResolver::new(self.store.as_ref());
                let chef = resolver.chef_employee(principal).await?;
                self.store
                    .documents_for_department(chef.department_id)
                    .await
            }
            Role::Employee => {
                let resolver = ScopeResolver::new(self.store.as_ref());
                let department = resolver
                    .own_employee(principal)
                    .await?
                    .map(|e| e.department_id);

                let mut documents = self.store.documents_created_by(principal.user_id).await?;
                if let Some(department) = department {
                    for document in self.store.documents_for_department(department).await? {
                        let mine = document.created_by == Some(principal.user_id);
                        let incoming = document.status != DocumentStatus::Draft
                            && document.target_department_id == Some(department);
                        if !mine && incoming {
                            documents.push(document);
                        }
                    }
                }
                documents.sort_by(|a, b| b.id.cmp(&a.id));
                Ok(documents)
            }
        }
    }

    /// Audit trail, oldest first, private notes filtered to their author
    /// and the RH_SENIOR/GRH roles.
    pub async fn history(
        &self,
        principal: &Principal,
        document_id: i64,
    ) -> HrResult<Vec<DocumentHistory>> {
        let document = self.load(document_id).await?;
        if !self.can_access(principal, &document).await? {
            return Err(HrError::forbidden("no access to this document"));
        }
        let privileged = matches!(principal.role, Role::RhSenior | Role::Grh);
        let trail = self
            .store
            .history_for_document(document_id)
            .await?
            .into_iter()
            .filter(|row| {
                !row.is_private || privileged || row.by_user == Some(principal.user_id)
            })
            .collect();
        Ok(trail)
    }

    async fn load(&self, document_id: i64) -> HrResult<Document> {
        self.store
            .document_by_id(document_id)
            .await?
            .ok_or_else(|| HrError::not_found("Document", document_id))
    }

    fn is_creator(&self, principal: &Principal, document: &Document) -> bool {
        document.created_by == Some(principal.user_id)
    }

    async fn is_source_chef(
        &self,
        principal: &Principal,
        document: &Document,
    ) -> HrResult<bool> {
        if principal.role != Role::Chef {
            return Ok(false);
        }
        let resolver = ScopeResolver::new(self.store.as_ref());
        let chef = resolver.chef_employee(principal).await?;
        Ok(chef.department_id == document.source_department_id)
    }

    /// Creator, RH_SENIOR, GRH, or anyone whose employee record sits in
    /// the source or target department.
    async fn can_access(&self, principal: &Principal, document: &Document) -> HrResult<bool> {
        if matches!(principal.role, Role::RhSenior | Role::Grh) || self.is_creator(principal, document)
        {
            return Ok(true);
        }
        let resolver = ScopeResolver::new(self.store.as_ref());
        let Some(employee) = resolver.own_employee(principal).await? else {
            return Ok(false);
        };
        let dept = employee.department_id;
        Ok(document.source_department_id == dept
            || document.target_department_id == Some(dept))
    }

    async fn append_history(
        &self,
        document: &Document,
        principal: &Principal,
        action: DocumentAction,
        note: String,
        now: DateTime<Utc>,
    ) -> HrResult<()> {
        self.store
            .insert_history(DocumentHistory {
                id: None,
                document_id: entity_id(document, "Document")?,
                parent_id: None,
                action,
                by_user: Some(principal.user_id),
                note,
                is_private: false,
                created_at: Some(now),
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, NotificationStore};
    use chrono::TimeZone;
    use hr_core::traits::Id;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: DocumentService,
        eng: Id,
        fin: Id,
        rh_type: Id,
        internal_type: Id,
        employee: Principal,
        chef: Principal,
        senior: Principal,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let eng = store.add_department("Engineering").await;
        let fin = store.add_department("Finance").await;
        let rh_type = store.add_doc_type("Payslip", DocumentCategory::Rh).await;
        let internal_type = store
            .add_doc_type("Memo", DocumentCategory::Internal)
            .await;

        let emp_user = store.add_user("emp@example.com", Role::Employee).await;
        let chef_user = store.add_user("chef@example.com", Role::Chef).await;
        let senior_user = store.add_user("senior@example.com", Role::RhSenior).await;
        store
            .add_employee("Amel", "Riahi", "emp@example.com", eng, None)
            .await;
        store
            .add_employee("Karim", "Sassi", "chef@example.com", eng, None)
            .await;

        let service = DocumentService::new(store.clone());
        Fixture {
            store,
            service,
            eng,
            fin,
            rh_type,
            internal_type,
            employee: Principal::new(emp_user, "emp@example.com", Role::Employee),
            chef: Principal::new(chef_user, "chef@example.com", Role::Chef),
            senior: Principal::new(senior_user, "senior@example.com", Role::RhSenior),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
    }

    fn upload(doc_type_id: Id, target: Option<Id>) -> UploadDocument {
        UploadDocument {
            title: "Q1 payslips".into(),
            doc_type_id,
            file: "documents/q1.pdf".into(),
            source_department_id: None,
            target_department_id: target,
        }
    }

    #[tokio::test]
    async fn test_upload_sources_from_own_department() {
        let f = fixture().await;
        let doc = f
            .service
            .upload(&f.employee, upload(f.rh_type, None), now())
            .await
            .unwrap();
        assert_eq!(doc.source_department_id, f.eng);
        assert_eq!(doc.status, DocumentStatus::Draft);

        let trail = f.service.history(&f.employee, doc.id.unwrap()).await.unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].action, DocumentAction::Created);
    }

    #[tokio::test]
    async fn test_employee_cannot_source_other_department() {
        let f = fixture().await;
        let mut params = upload(f.rh_type, None);
        params.source_department_id = Some(f.fin);
        let err = f.service.upload(&f.employee, params, now()).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_rh_simple_limited_to_rh_category() {
        let f = fixture().await;
        let rh_user = f.store.add_user("rh@example.com", Role::RhSimple).await;
        let rh = Principal::new(rh_user, "rh@example.com", Role::RhSimple);

        let mut params = upload(f.internal_type, None);
        params.source_department_id = Some(f.eng);
        let err = f.service.upload(&rh, params, now()).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let mut params = upload(f.rh_type, None);
        params.source_department_id = Some(f.eng);
        assert!(f.service.upload(&rh, params, now()).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_requires_target_and_notifies_it() {
        let f = fixture().await;
        let fin_user = f.store.add_user("fin@example.com", Role::Employee).await;
        f.store
            .add_employee("Nour", "Haddad", "fin@example.com", f.fin, None)
            .await;

        let doc = f
            .service
            .upload(&f.employee, upload(f.rh_type, None), now())
            .await
            .unwrap();

        let err = f
            .service
            .send(&f.employee, doc.id.unwrap(), None, now())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("target department"));

        let sent = f
            .service
            .send(&f.employee, doc.id.unwrap(), Some(f.fin), now())
            .await
            .unwrap();
        assert_eq!(sent.status, DocumentStatus::Sent);
        assert!(sent.sent_at.is_some());

        let inbox = f.store.notifications_for_user(fin_user).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].title, "Document received");

        // the sender's own department was not notified
        assert!(f
            .store
            .notifications_for_user(f.employee.user_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_send_only_from_draft_and_only_by_creator_or_source_chef() {
        let f = fixture().await;
        let doc = f
            .service
            .upload(&f.employee, upload(f.rh_type, Some(f.fin)), now())
            .await
            .unwrap();

        // a chef of another department cannot send
        let fin_chef_user = f.store.add_user("finchef@example.com", Role::Chef).await;
        f.store
            .add_employee("Hedi", "Ben Salah", "finchef@example.com", f.fin, None)
            .await;
        let fin_chef = Principal::new(fin_chef_user, "finchef@example.com", Role::Chef);
        let err = f
            .service
            .send(&fin_chef, doc.id.unwrap(), None, now())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        // the source-department chef can
        f.service
            .send(&f.chef, doc.id.unwrap(), None, now())
            .await
            .unwrap();

        let err = f
            .service
            .send(&f.employee, doc.id.unwrap(), None, now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "conflict");
    }

    #[tokio::test]
    async fn test_outside_chef_cannot_comment() {
        let f = fixture().await;
        let doc = f
            .service
            .upload(&f.employee, upload(f.rh_type, None), now())
            .await
            .unwrap();

        let outsider_user = f.store.add_user("finchef@example.com", Role::Chef).await;
        f.store
            .add_employee("Hedi", "Ben Salah", "finchef@example.com", f.fin, None)
            .await;
        let outsider = Principal::new(outsider_user, "finchef@example.com", Role::Chef);

        let err = f
            .service
            .comment(
                &outsider,
                doc.id.unwrap(),
                CommentDocument {
                    note: "looks wrong".into(),
                    ..Default::default()
                },
                now(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_comment_threading_rules() {
        let f = fixture().await;
        let doc = f
            .service
            .upload(&f.employee, upload(f.rh_type, None), now())
            .await
            .unwrap();
        let doc_id = doc.id.unwrap();

        let root = f
            .service
            .comment(
                &f.employee,
                doc_id,
                CommentDocument {
                    note: "please review".into(),
                    ..Default::default()
                },
                now(),
            )
            .await
            .unwrap();

        // reply under the comment works
        let reply = f
            .service
            .comment(
                &f.chef,
                doc_id,
                CommentDocument {
                    note: "done".into(),
                    parent_id: root.id,
                    ..Default::default()
                },
                now(),
            )
            .await
            .unwrap();

        // but not under the reply
        let err = f
            .service
            .comment(
                &f.employee,
                doc_id,
                CommentDocument {
                    note: "thanks".into(),
                    parent_id: reply.id,
                    ..Default::default()
                },
                now(),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nested"));

        // parent must be a COMMENTED row, not the CREATED row
        let trail = f.service.history(&f.senior, doc_id).await.unwrap();
        let created_id = trail
            .iter()
            .find(|r| r.action == DocumentAction::Created)
            .and_then(|r| r.id);
        let err = f
            .service
            .comment(
                &f.employee,
                doc_id,
                CommentDocument {
                    note: "reply to audit row".into(),
                    parent_id: created_id,
                    ..Default::default()
                },
                now(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_private_notes_hidden_from_other_readers() {
        let f = fixture().await;
        let doc = f
            .service
            .upload(&f.employee, upload(f.rh_type, None), now())
            .await
            .unwrap();
        let doc_id = doc.id.unwrap();

        f.service
            .comment(
                &f.chef,
                doc_id,
                CommentDocument {
                    note: "salary discrepancy".into(),
                    is_private: true,
                    ..Default::default()
                },
                now(),
            )
            .await
            .unwrap();

        let for_author = f.service.history(&f.chef, doc_id).await.unwrap();
        assert!(for_author.iter().any(|r| r.is_private));

        let for_senior = f.service.history(&f.senior, doc_id).await.unwrap();
        assert!(for_senior.iter().any(|r| r.is_private));

        let for_employee = f.service.history(&f.employee, doc_id).await.unwrap();
        assert!(!for_employee.iter().any(|r| r.is_private));
    }

    #[tokio::test]
    async fn test_validate_then_archive_transitions() {
        let f = fixture().await;
        let doc = f
            .service
            .upload(&f.employee, upload(f.rh_type, Some(f.fin)), now())
            .await
            .unwrap();
        let doc_id = doc.id.unwrap();
        f.service.send(&f.employee, doc_id, None, now()).await.unwrap();

        // chef cannot validate
        let err = f.service.validate(&f.chef, doc_id, now()).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let validated = f.service.validate(&f.senior, doc_id, now()).await.unwrap();
        assert_eq!(validated.status, DocumentStatus::Validated);
        assert_eq!(validated.validated_by, Some(f.senior.user_id));

        // validation is not repeatable
        let err = f.service.validate(&f.senior, doc_id, now()).await.unwrap_err();
        assert_eq!(err.kind(), "conflict");

        let archived = f.service.archive(&f.senior, doc_id, now()).await.unwrap();
        assert_eq!(archived.status, DocumentStatus::Archived);
        let err = f.service.archive(&f.senior, doc_id, now()).await.unwrap_err();
        assert_eq!(err.kind(), "conflict");

        let trail = f.service.history(&f.senior, doc_id).await.unwrap();
        let actions: Vec<DocumentAction> = trail.iter().map(|r| r.action).collect();
        assert_eq!(
            actions,
            vec![
                DocumentAction::Created,
                DocumentAction::Sent,
                DocumentAction::Validated,
                DocumentAction::Archived,
            ]
        );
    }

    #[tokio::test]
    async fn test_listing_is_role_scoped() {
        let f = fixture().await;
        let mine = f
            .service
            .upload(&f.employee, upload(f.rh_type, None), now())
            .await
            .unwrap();

        // incoming: created elsewhere, sent to engineering
        let mut params = upload(f.rh_type, Some(f.eng));
        params.source_department_id = Some(f.fin);
        let incoming = f.service.upload(&f.senior, params, now()).await.unwrap();
        f.service
            .send(&f.senior, incoming.id.unwrap(), None, now())
            .await
            .unwrap();

        // a draft targeted at engineering stays invisible to employees
        let mut draft_params = upload(f.rh_type, Some(f.eng));
        draft_params.source_department_id = Some(f.fin);
        f.service.upload(&f.senior, draft_params, now()).await.unwrap();

        let listed = f.service.list(&f.employee).await.unwrap();
        let ids: Vec<Id> = listed.iter().filter_map(|d| d.id).collect();
        assert!(ids.contains(&mine.id.unwrap()));
        assert!(ids.contains(&incoming.id.unwrap()));
        assert_eq!(ids.len(), 2);

        // RH_SENIOR sees everything
        assert_eq!(f.service.list(&f.senior).await.unwrap().len(), 3);
    }
}
