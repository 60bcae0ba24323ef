//! Built-in payload texts.
//!
//! Plain data. Placeholders use `{{NAME}}`; single braces are Python.
//! Fragments (`imports-*`, `endpoints-ml`, `endpoints-microservice*`) are
//! spliced into `endpoints-base` through the `AUTH_IMPORTS`,
//! `DATABASE_IMPORTS` and `PROJECT_ENDPOINTS` variables.

use crate::domain::entities::Template;

pub const BUILTIN_VERSION: &str = "1.0.0";

// ── Endpoints file ───────────────────────────────────────────────────────────

const ENDPOINTS_BASE: &str = r#""""
Main API Endpoints
"""

from fastapi import APIRouter, Depends, HTTPException, status
{{AUTH_IMPORTS}}{{DATABASE_IMPORTS}}
router = APIRouter()


@router.get("/")
async def root():
    """Root endpoint"""
    return {"message": "Welcome to {{PROJECT_NAME_TITLE}} API", "version": "1.0.0"}


@router.get("/health")
async def health_check():
    """Health check endpoint"""
    return {"status": "healthy", "service": "{{PROJECT_NAME_TITLE}}"}
{{PROJECT_ENDPOINTS}}"#;

const IMPORTS_AUTH: &str = "from app.core.security import get_current_user\n";

const IMPORTS_DB_SQL_ASYNC: &str = "from app.db.database import get_db
from sqlalchemy.ext.asyncio import AsyncSession
from app.models.auth import User
";

const IMPORTS_DB_SQL_SYNC: &str = "from app.db.database import get_db
from sqlalchemy.orm import Session
from app.models.auth import User
";

const IMPORTS_DB_SCHEMA_USER: &str = "from app.schemas.auth import User\n";

const ENDPOINTS_ML: &str = r#"

@router.post("/predict")
async def predict(input_data: dict):
    """Make ML prediction"""
    from app.services.prediction_service import make_prediction
    try:
        result = await make_prediction(input_data)
        return {"prediction": result, "status": "success"}
    except Exception as e:
        raise HTTPException(status_code=400, detail=str(e))


@router.get("/model/info")
async def get_model_info():
    """Get ML model information"""
    return {
        "model_name": "DefaultModel",
        "version": "1.0.0",
        "description": "Machine Learning model for predictions"
    }
"#;

const ENDPOINTS_MICROSERVICE: &str = r#"

@router.get("/status")
async def service_status():
    """Get service status"""
    return {
        "service": "{{PROJECT_NAME}}",
        "status": "running",
        "version": "1.0.0"
    }


@router.post("/process")
async def process_data(data: dict):
    """Process data"""
    from app.services.processing_service import process_data
    try:
        result = await process_data(data)
        return {"result": result, "status": "processed"}
    except Exception as e:
        raise HTTPException(status_code=400, detail=str(e))
"#;

const ENDPOINTS_MICROSERVICE_AUTH: &str = r#"

@router.get("/status")
async def service_status():
    """Get service status"""
    return {
        "service": "{{PROJECT_NAME}}",
        "status": "running",
        "version": "1.0.0"
    }


@router.post("/process")
async def process_data(
    data: dict,
    current_user: {{CURRENT_USER_TYPE}} = Depends(get_current_user)
):
    """Process data"""
    from app.services.processing_service import process_data
    try:
        result = await process_data(data)
        return {"result": result, "status": "processed"}
    except Exception as e:
        raise HTTPException(status_code=400, detail=str(e))
"#;

// ── Auth file ────────────────────────────────────────────────────────────────

const AUTH_JWT_SQL: &str = r#""""
JWT Authentication Endpoints
"""

from datetime import timedelta
from fastapi import APIRouter, Depends, HTTPException, status
{{SESSION_IMPORT}}
from app.core.config import settings
from app.db.database import get_db
from app.schemas.auth import Token, UserLogin, UserCreate, User as UserSchema
from app.core.security import (
    authenticate_user,
    create_access_token,
    get_current_user,
    get_user_by_email,
    create_user
)

router = APIRouter()


@router.post("/token", response_model=Token)
async def login_for_access_token(
    user_credentials: UserLogin,
    db: {{SESSION_TYPE}} = Depends(get_db)
):
    """Login endpoint to get access token"""
    user = {{AWAIT}}authenticate_user(db, user_credentials.email, user_credentials.password)
    if not user:
        raise HTTPException(
            status_code=status.HTTP_401_UNAUTHORIZED,
            detail="Incorrect email or password",
            headers={"WWW-Authenticate": "Bearer"},
        )

    access_token_expires = timedelta(minutes=settings.ACCESS_TOKEN_EXPIRE_MINUTES)
    access_token = create_access_token(
        data={"sub": str(user.id)}, expires_delta=access_token_expires
    )
    return {"access_token": access_token, "token_type": "bearer"}


@router.post("/register", response_model=UserSchema, status_code=status.HTTP_201_CREATED)
async def register_user(
    user_data: UserCreate,
    db: {{SESSION_TYPE}} = Depends(get_db)
):
    """Register new user"""
    existing_user = {{AWAIT}}get_user_by_email(db, user_data.email)
    if existing_user:
        raise HTTPException(
            status_code=status.HTTP_400_BAD_REQUEST,
            detail="Email already registered"
        )

    user = {{AWAIT}}create_user(db, user_data.email, user_data.password)
    return user


@router.get("/me", response_model=UserSchema)
async def read_users_me(current_user: UserSchema = Depends(get_current_user)):
    """Get current user information"""
    return current_user


@router.put("/me", response_model=UserSchema)
async def update_user_me(
    user_update: dict,
    current_user: UserSchema = Depends(get_current_user),
    db: {{SESSION_TYPE}} = Depends(get_db)
):
    """Update current user information"""
    # Placeholder: apply `user_update` to the stored profile.
    return current_user
"#;

const AUTH_JWT_KEYVALUE: &str = r#""""
JWT Authentication Endpoints with Redis
"""

from datetime import timedelta
from fastapi import APIRouter, Depends, HTTPException, status
from app.core.config import settings
from app.schemas.auth import Token, UserLogin, UserCreate, User as UserSchema
from app.core.security import authenticate_user, create_access_token, get_current_user

router = APIRouter()


@router.post("/token", response_model=Token)
{{ASYNC}}def login_for_access_token(user_credentials: UserLogin):
    """Login endpoint to get access token"""
    user = {{AWAIT}}authenticate_user(user_credentials.email, user_credentials.password)
    if not user:
        raise HTTPException(
            status_code=status.HTTP_401_UNAUTHORIZED,
            detail="Incorrect email or password",
            headers={"WWW-Authenticate": "Bearer"},
        )
    access_token_expires = timedelta(minutes=settings.ACCESS_TOKEN_EXPIRE_MINUTES)
    access_token = create_access_token(
        data={"sub": user.email}, expires_delta=access_token_expires
    )
    return {"access_token": access_token, "token_type": "bearer"}


@router.post("/register", response_model=UserSchema)
{{ASYNC}}def register_user(user_data: UserCreate):
    """Register new user"""
    # Implement registration on top of the Redis service:
    # from app.services.redis_service import redis_service
    #
    # 1. Reject duplicates: {{AWAIT}}redis_service.exists(f"user:{user_data.email}")
    # 2. Hash the password: hashed_password = hash_password(user_data.password)
    # 3. Store the profile: {{AWAIT}}redis_service.hset(f"user:{user_data.email}", "profile", user_data.dict())
    raise HTTPException(
        status_code=status.HTTP_501_NOT_IMPLEMENTED,
        detail="User registration not implemented. Please implement your Redis user logic."
    )


@router.get("/me", response_model=UserSchema)
{{ASYNC}}def read_users_me(current_user: UserSchema = Depends(get_current_user)):
    """Get current user information"""
    return current_user


@router.put("/me", response_model=UserSchema)
{{ASYNC}}def update_user_me(
    user_update: dict,
    current_user: UserSchema = Depends(get_current_user)
):
    """Update current user information"""
    # Implement the update on top of the Redis service:
    # 1. Update the profile: {{AWAIT}}redis_service.hset(f"user:{current_user.email}", "profile", updated_data)
    # 2. Return the updated user
    raise HTTPException(
        status_code=status.HTTP_501_NOT_IMPLEMENTED,
        detail="User update not implemented. Please implement your Redis user logic."
    )
"#;

const AUTH_JWT_DOCUMENT: &str = r#""""
JWT Authentication Endpoints with MongoDB
"""

from datetime import timedelta
from fastapi import APIRouter, Depends, HTTPException, status
from app.core.config import settings
from app.schemas.auth import Token, UserLogin, UserCreate, User as UserSchema
from app.core.security import authenticate_user, create_access_token, get_current_user

router = APIRouter()


@router.post("/token", response_model=Token)
{{ASYNC}}def login_for_access_token(user_credentials: UserLogin):
    """Login endpoint to get access token"""
    user = {{AWAIT}}authenticate_user(user_credentials.email, user_credentials.password)
    if not user:
        raise HTTPException(
            status_code=status.HTTP_401_UNAUTHORIZED,
            detail="Incorrect email or password",
            headers={"WWW-Authenticate": "Bearer"},
        )
    access_token_expires = timedelta(minutes=settings.ACCESS_TOKEN_EXPIRE_MINUTES)
    access_token = create_access_token(
        data={"sub": user.email}, expires_delta=access_token_expires
    )
    return {"access_token": access_token, "token_type": "bearer"}


@router.post("/register", response_model=UserSchema)
{{ASYNC}}def register_user(user_data: UserCreate):
    """Register new user"""
    # Implement registration on a MongoDB collection:
    # from app.db.mongodb import get_collection
    # users = get_collection("users")
    #
    # 1. Reject duplicates: {{AWAIT}}users.find_one({"email": user_data.email})
    # 2. Hash the password: hashed_password = hash_password(user_data.password)
    # 3. Insert the document: {{AWAIT}}users.insert_one({"email": user_data.email, "hashed_password": hashed_password})
    raise HTTPException(
        status_code=status.HTTP_501_NOT_IMPLEMENTED,
        detail="User registration not implemented. Please implement your MongoDB user logic."
    )


@router.get("/me", response_model=UserSchema)
{{ASYNC}}def read_users_me(current_user: UserSchema = Depends(get_current_user)):
    """Get current user information"""
    return current_user


@router.put("/me", response_model=UserSchema)
{{ASYNC}}def update_user_me(
    user_update: dict,
    current_user: UserSchema = Depends(get_current_user)
):
    """Update current user information"""
    # Implement the update on the users collection:
    # 1. Apply the changes: {{AWAIT}}users.update_one({"email": current_user.email}, {"$set": user_update})
    # 2. Return the updated user
    raise HTTPException(
        status_code=status.HTTP_501_NOT_IMPLEMENTED,
        detail="User update not implemented. Please implement your MongoDB user logic."
    )
"#;

const AUTH_OAUTH2_SQL: &str = r#""""
OAuth2 Authentication Endpoints with Database
"""

from datetime import timedelta
from fastapi import APIRouter, Depends, HTTPException, status
from fastapi.security import OAuth2PasswordRequestForm
{{SESSION_IMPORT}}
from app.core.config import settings
from app.db.database import get_db
from app.schemas.auth import Token, UserCreate, User as UserSchema
from app.core.security import (
    authenticate_user,
    create_access_token,
    get_current_active_user,
    get_user_by_email,
    create_user
)

router = APIRouter()


@router.post("/token", response_model=Token)
async def login_for_access_token(
    form_data: OAuth2PasswordRequestForm = Depends(),
    db: {{SESSION_TYPE}} = Depends(get_db)
):
    """OAuth2 compatible token login, get an access token for future requests"""
    user = {{AWAIT}}authenticate_user(db, form_data.username, form_data.password)
    if not user:
        raise HTTPException(
            status_code=status.HTTP_401_UNAUTHORIZED,
            detail="Incorrect username or password",
            headers={"WWW-Authenticate": "Bearer"},
        )
    access_token_expires = timedelta(minutes=settings.ACCESS_TOKEN_EXPIRE_MINUTES)
    access_token = create_access_token(
        data={"sub": str(user.id)}, expires_delta=access_token_expires
    )
    return {"access_token": access_token, "token_type": "bearer"}


@router.post("/register", response_model=UserSchema, status_code=status.HTTP_201_CREATED)
async def register_user(
    user_data: UserCreate,
    db: {{SESSION_TYPE}} = Depends(get_db)
):
    """Register new user"""
    existing_user = {{AWAIT}}get_user_by_email(db, user_data.email)
    if existing_user:
        raise HTTPException(
            status_code=status.HTTP_400_BAD_REQUEST,
            detail="Email already registered"
        )

    user = {{AWAIT}}create_user(db, user_data.email, user_data.password)
    return user


@router.get("/me", response_model=UserSchema)
async def read_users_me(current_user: UserSchema = Depends(get_current_active_user)):
    """Get current user information"""
    return current_user


@router.put("/me", response_model=UserSchema)
async def update_user_me(
    user_update: dict,
    current_user: UserSchema = Depends(get_current_active_user),
    db: {{SESSION_TYPE}} = Depends(get_db)
):
    """Update current user information"""
    # Placeholder: apply `user_update` to the stored profile.
    return current_user
"#;

const AUTH_OAUTH2_SIMPLE: &str = r#""""
OAuth2 Authentication Endpoints (Simple)
"""

from datetime import timedelta
from fastapi import APIRouter, Depends, HTTPException, status
from fastapi.security import OAuth2PasswordRequestForm
from app.core.config import settings
from app.core.security import (
    authenticate_user,
    create_access_token,
    get_current_active_user
)

router = APIRouter()


@router.post("/token")
async def login_for_access_token(form_data: OAuth2PasswordRequestForm = Depends()):
    """OAuth2 compatible token login, get an access token for future requests"""
    user = authenticate_user(form_data.username, form_data.password)
    if not user:
        raise HTTPException(
            status_code=status.HTTP_401_UNAUTHORIZED,
            detail="Incorrect email or password",
            headers={"WWW-Authenticate": "Bearer"},
        )
    access_token_expires = timedelta(minutes=settings.ACCESS_TOKEN_EXPIRE_MINUTES)
    access_token = create_access_token(
        data={"sub": user["username"]}, expires_delta=access_token_expires
    )
    return {"access_token": access_token, "token_type": "bearer"}


@router.get("/me")
async def read_users_me(current_user: dict = Depends(get_current_active_user)):
    """Get current user information"""
    return {"username": current_user["username"], "email": current_user["email"]}


@router.post("/logout")
async def logout():
    """Logout endpoint"""
    # Provider-specific logout (Google, GitHub, Auth0, ...) goes here.
    return {"message": "Logout successful"}
"#;

const AUTH_API_KEY: &str = r#""""
API Key Authentication Endpoints
"""

from fastapi import APIRouter, Depends
from app.core.security import get_api_key

router = APIRouter()


@router.get("/verify")
async def verify_api_key(api_key: str = Depends(get_api_key)):
    """Verify API key"""
    return {"message": "API key is valid", "api_key": api_key[:8] + "***"}
"#;

// ── Router aggregator ────────────────────────────────────────────────────────

const ROUTER_WITH_AUTH: &str = r#""""
API v1 Router
"""

from fastapi import APIRouter
from .endpoints import router as endpoints_router
from .auth import router as auth_router

router = APIRouter()
router.include_router(endpoints_router)
router.include_router(auth_router, prefix="/auth", tags=["authentication"])
"#;

const ROUTER_ROOT_ONLY: &str = r#""""
API v1 Router
"""

from .endpoints import router
"#;

/// Every built-in payload.
pub fn builtin() -> Vec<Template> {
    vec![
        Template::builtin("endpoints-base", "Main endpoints file with / and /health", ENDPOINTS_BASE),
        Template::builtin("imports-auth", "Auth dependency import for the endpoints file", IMPORTS_AUTH),
        Template::builtin("imports-db-sql-async", "Async SQL session imports", IMPORTS_DB_SQL_ASYNC),
        Template::builtin("imports-db-sql-sync", "Sync SQL session imports", IMPORTS_DB_SQL_SYNC),
        Template::builtin("imports-db-keyvalue", "User schema import for key-value stores", IMPORTS_DB_SCHEMA_USER),
        Template::builtin("imports-db-document", "User schema import for document stores", IMPORTS_DB_SCHEMA_USER),
        Template::builtin("endpoints-ml", "ML routes: /predict and /model/info", ENDPOINTS_ML),
        Template::builtin("endpoints-microservice", "Microservice routes: /status and /process", ENDPOINTS_MICROSERVICE),
        Template::builtin(
            "endpoints-microservice-auth",
            "Microservice routes with an authenticated /process",
            ENDPOINTS_MICROSERVICE_AUTH,
        ),
        Template::builtin("auth-jwt-sql", "JWT endpoints over a SQL session", AUTH_JWT_SQL),
        Template::builtin("auth-jwt-keyvalue", "JWT endpoints for Redis", AUTH_JWT_KEYVALUE),
        Template::builtin("auth-jwt-document", "JWT endpoints for MongoDB", AUTH_JWT_DOCUMENT),
        Template::builtin("auth-oauth2-sql", "OAuth2 password flow with a database", AUTH_OAUTH2_SQL),
        Template::builtin("auth-oauth2-simple", "OAuth2 password flow without a database", AUTH_OAUTH2_SIMPLE),
        Template::builtin("auth-api-key", "API key verification endpoint", AUTH_API_KEY),
        Template::builtin("router-with-auth", "v1 router mounting /auth", ROUTER_WITH_AUTH),
        Template::builtin("router-root-only", "v1 router re-exporting the root router", ROUTER_ROOT_ONLY),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision_table::all_combinations;
    use std::collections::HashSet;

    #[test]
    fn builtin_payloads_are_valid_and_unique() {
        let all = builtin();
        let mut names = HashSet::new();
        for t in &all {
            t.validate().unwrap();
            assert!(names.insert(t.id.name().to_string()), "duplicate {}", t.id);
            assert!(t.is_builtin());
        }
    }

    #[test]
    fn every_selected_payload_exists() {
        let names: HashSet<_> = builtin().into_iter().map(|t| t.id.name().to_string()).collect();
        for row in all_combinations() {
            if let Ok(selection) = row.selection {
                for name in selection.template_names() {
                    assert!(names.contains(name), "missing payload {name}");
                }
            }
        }
    }

    #[test]
    fn stub_branches_return_not_implemented() {
        for text in [AUTH_JWT_KEYVALUE, AUTH_JWT_DOCUMENT] {
            assert_eq!(text.matches("HTTP_501_NOT_IMPLEMENTED").count(), 2);
        }
    }
}
